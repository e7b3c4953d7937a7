// src/simulation/results.rs

//! Read-only projections of market histories into report rows.

use crate::simulation::bertrand::BertrandMarket;
use crate::simulation::cournot::CournotMarket;
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BertrandRow {
    #[serde(rename = "Round")]
    pub round: usize,
    #[serde(rename = "Player 1 Price")]
    pub player1_price: f64,
    #[serde(rename = "Player 2 Price")]
    pub player2_price: f64,
    #[serde(rename = "Player 1 Units Sold")]
    pub player1_units_sold: u32,
    #[serde(rename = "Player 2 Units Sold")]
    pub player2_units_sold: u32,
    #[serde(rename = "Player 1 Profit")]
    pub player1_profit: f64,
    #[serde(rename = "Player 2 Profit")]
    pub player2_profit: f64,
    #[serde(rename = "Player 1 Investment")]
    pub player1_investment: f64,
    #[serde(rename = "Player 2 Investment")]
    pub player2_investment: f64,
    #[serde(rename = "Player 1 Production Cost")]
    pub player1_production_cost: f64,
    #[serde(rename = "Player 2 Production Cost")]
    pub player2_production_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CournotRow {
    #[serde(rename = "Round")]
    pub round: usize,
    #[serde(rename = "Player 1 Quantity")]
    pub player1_quantity: u32,
    #[serde(rename = "Player 2 Quantity")]
    pub player2_quantity: u32,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "Player 1 Profit")]
    pub player1_profit: f64,
    #[serde(rename = "Player 2 Profit")]
    pub player2_profit: f64,
}

/// One row per played Bertrand round.
///
/// Units sold come from the per-round history, which always equals the split
/// recomputed from that round's stored price pair.
pub fn bertrand_rows(market: &BertrandMarket) -> Vec<BertrandRow> {
    let [f1, f2] = &market.firms;
    (0..market.rounds_played())
        .map(|i| BertrandRow {
            round: i + 1,
            player1_price: f1.prices[i],
            player2_price: f2.prices[i],
            player1_units_sold: f1.units_sold_history[i],
            player2_units_sold: f2.units_sold_history[i],
            player1_profit: f1.profits[i],
            player2_profit: f2.profits[i],
            player1_investment: f1.investments[i],
            player2_investment: f2.investments[i],
            player1_production_cost: f1.cost_history[i],
            player2_production_cost: f2.cost_history[i],
        })
        .collect()
}

/// One row per reported Cournot round, capped at the planned round count.
pub fn cournot_rows(market: &CournotMarket) -> Vec<CournotRow> {
    let played = market.rounds_played();
    let reported = played.min(market.num_rounds);
    if played > market.num_rounds {
        warn!(
            played,
            planned = market.num_rounds,
            "more rounds played than planned; extra rounds left out of the report"
        );
    } else if played < market.num_rounds {
        debug!(played, planned = market.num_rounds, "session not finished yet");
    }

    (0..reported)
        .map(|i| CournotRow {
            round: i + 1,
            player1_quantity: market.player1_quantities[i],
            player2_quantity: market.player2_quantities[i],
            price: market.prices[i],
            player1_profit: market.player1_profits[i],
            player2_profit: market.player2_profits[i],
        })
        .collect()
}

/// Final position of a Bertrand firm.
#[derive(Debug, Clone, PartialEq)]
pub struct FirmStanding {
    pub name: String,
    pub capital: f64,
    pub production_cost: f64,
    pub total_profit: f64,
}

pub fn bertrand_standings(market: &BertrandMarket) -> [FirmStanding; 2] {
    market.firms.clone().map(|firm| FirmStanding {
        total_profit: firm.total_profit(),
        name: firm.name,
        capital: firm.capital,
        production_cost: firm.production_cost,
    })
}

/// Profit summary of a Cournot player over the reported rounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfitSummary {
    pub total_profit: f64,
    pub average_profit: f64,
}

impl ProfitSummary {
    fn from_profits(profits: &[f64]) -> Self {
        let total_profit: f64 = profits.iter().sum();
        let average_profit = if profits.is_empty() {
            0.0
        } else {
            total_profit / profits.len() as f64
        };
        Self {
            total_profit,
            average_profit,
        }
    }
}

pub fn cournot_summary(rows: &[CournotRow]) -> [ProfitSummary; 2] {
    let p1: Vec<f64> = rows.iter().map(|r| r.player1_profit).collect();
    let p2: Vec<f64> = rows.iter().map(|r| r.player2_profit).collect();
    [ProfitSummary::from_profits(&p1), ProfitSummary::from_profits(&p2)]
}
