// src/simulation/config.rs

use crate::simulation::error::SimError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// How a firm's capital behaves when an investment exceeds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapitalFloor {
    /// Capital may go negative.
    #[default]
    Unbounded,
    /// Capital is clamped at zero after each investment.
    Zero,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BertrandConfig {
    pub rounds: usize,
    pub max_demand: u32,
    pub initial_capital: f64,
    pub initial_cost: f64,
    pub cost_floor: f64,
    /// Accepted posted-price range, enforced by the session driver only.
    pub min_price: f64,
    pub max_price: f64,
    pub capital_floor: CapitalFloor,
}

impl BertrandConfig {
    pub const MAX_ROUNDS: usize = 20;

    pub fn validate(&self) -> Result<(), SimError> {
        if !(1..=Self::MAX_ROUNDS).contains(&self.rounds) {
            return Err(SimError::InvalidConfig(format!(
                "bertrand rounds must be within 1..={}, got {}",
                Self::MAX_ROUNDS,
                self.rounds
            )));
        }
        if self.max_demand == 0 {
            return Err(SimError::InvalidConfig("max_demand must be positive".into()));
        }
        let money = [
            self.initial_capital,
            self.initial_cost,
            self.cost_floor,
            self.min_price,
            self.max_price,
        ];
        if money.iter().any(|v| !v.is_finite()) {
            return Err(SimError::InvalidConfig("bertrand values must be finite".into()));
        }
        if self.cost_floor < 0.0 || self.initial_cost < self.cost_floor {
            return Err(SimError::InvalidConfig(format!(
                "initial cost {} must be at or above cost floor {} (>= 0)",
                self.initial_cost, self.cost_floor
            )));
        }
        if self.min_price < 0.0 || self.min_price > self.max_price {
            return Err(SimError::InvalidConfig(format!(
                "price range [{}, {}] is empty or negative",
                self.min_price, self.max_price
            )));
        }
        Ok(())
    }
}

impl Default for BertrandConfig {
    fn default() -> Self {
        Self {
            rounds: 5,
            max_demand: 100,
            initial_capital: 1000.0,
            initial_cost: 50.0,
            cost_floor: 30.0,
            min_price: 0.0,
            max_price: 150.0,
            capital_floor: CapitalFloor::Unbounded,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CournotConfig {
    /// Planned number of rounds; also caps the results table.
    pub num_rounds: usize,
    pub base_price: f64,
    pub cost_per_cup: f64,
    pub max_quantity: u32,
}

impl CournotConfig {
    pub const MAX_ROUNDS: usize = 100;

    pub fn validate(&self) -> Result<(), SimError> {
        if !(1..=Self::MAX_ROUNDS).contains(&self.num_rounds) {
            return Err(SimError::InvalidConfig(format!(
                "cournot rounds must be within 1..={}, got {}",
                Self::MAX_ROUNDS,
                self.num_rounds
            )));
        }
        if !(self.base_price.is_finite() && self.base_price > 0.0) {
            return Err(SimError::InvalidConfig("base_price must be positive".into()));
        }
        if !(self.cost_per_cup.is_finite() && self.cost_per_cup >= 0.0) {
            return Err(SimError::InvalidConfig("cost_per_cup must be non-negative".into()));
        }
        Ok(())
    }
}

impl Default for CournotConfig {
    fn default() -> Self {
        Self {
            num_rounds: 10,
            base_price: 5.0,
            cost_per_cup: 1.0,
            max_quantity: 10,
        }
    }
}

/// Top-level settings; every field falls back to its default when missing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub bertrand: BertrandConfig,
    pub cournot: CournotConfig,
}

impl GameConfig {
    pub fn from_json_file(path: &Path) -> Result<Self, SimError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(raw)?)
    }
}
