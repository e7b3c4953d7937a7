// src/model/firm.rs

use crate::simulation::config::{BertrandConfig, CapitalFloor};

/// The economic state of one firm in the Bertrand game.
///
/// All `Vec` histories are append-only and indexed by `round - 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Firm {
    // Identity
    pub name: String,

    // State Variables
    pub capital: f64,
    pub production_cost: f64,
    pub price: f64,      // Posted this round
    pub units_sold: u32, // Allocated this round

    // History (one entry per resolved round)
    pub profits: Vec<f64>,
    pub prices: Vec<f64>,
    pub investments: Vec<f64>,
    pub units_sold_history: Vec<u32>,
    pub cost_history: Vec<f64>, // Cost after the round's adjustment

    capital_floor: CapitalFloor,
}

impl Firm {
    pub fn new(name: impl Into<String>, capital: f64, production_cost: f64) -> Self {
        Self {
            name: name.into(),
            capital,
            production_cost,
            price: 0.0,
            units_sold: 0,
            profits: Vec::new(),
            prices: Vec::new(),
            investments: Vec::new(),
            units_sold_history: Vec::new(),
            cost_history: Vec::new(),
            capital_floor: CapitalFloor::Unbounded,
        }
    }

    pub fn from_config(name: impl Into<String>, config: &BertrandConfig) -> Self {
        Self::new(name, config.initial_capital, config.initial_cost)
            .with_capital_floor(config.capital_floor)
    }

    pub fn with_capital_floor(mut self, floor: CapitalFloor) -> Self {
        self.capital_floor = floor;
        self
    }

    /// Records the price posted this round. Any value is accepted.
    pub fn set_price(&mut self, price: f64) {
        self.price = price;
        self.prices.push(price);
    }

    /// Stores this round's market allocation.
    pub fn record_sales(&mut self, units: u32) {
        self.units_sold = units;
        self.units_sold_history.push(units);
    }

    /// Books `(price - production_cost) * units_sold` into capital.
    ///
    /// Uses the cost in effect *before* this round's investment; the cost
    /// reduction only applies from the next round on. May be negative.
    pub fn book_profit(&mut self) -> f64 {
        let profit = (self.price - self.production_cost) * self.units_sold as f64;
        self.capital += profit;
        self.profits.push(profit);
        profit
    }

    /// Deducts `amount` from capital and records it.
    ///
    /// Capital is not guarded unless the firm was built with
    /// `CapitalFloor::Zero`.
    pub fn invest(&mut self, amount: f64) -> f64 {
        self.capital -= amount;
        if self.capital_floor == CapitalFloor::Zero && self.capital < 0.0 {
            self.capital = 0.0;
        }
        self.investments.push(amount);
        amount
    }

    /// Lowers production cost from direct investment (square-root returns)
    /// and from this round's market share, never below `floor`.
    ///
    /// A negative investment has no square root: the reduction is NaN and
    /// the cost drops straight to `floor`. Sessions reject such input before
    /// it gets here.
    pub fn adjust_cost(&mut self, investment: f64, max_demand: u32, floor: f64) -> f64 {
        let cost_reduction = investment.sqrt() / 10.0;
        let scale_effect = (self.units_sold as f64 / max_demand as f64) * 2.0;
        self.production_cost = (self.production_cost - cost_reduction - scale_effect).max(floor);
        self.cost_history.push(self.production_cost);
        self.production_cost
    }

    pub fn total_profit(&self) -> f64 {
        self.profits.iter().sum()
    }
}
