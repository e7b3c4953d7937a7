// src/simulation/error.rs

use thiserror::Error;

/// Errors raised at the boundary between the input layer and the engines.
///
/// The engines themselves never fail: every variant here is about inputs
/// (policies, scripts, config files) or about writing results out.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("round {round}: player {player} price {price} outside [{min}, {max}]")]
    PriceOutOfRange {
        round: usize,
        player: usize,
        price: f64,
        min: f64,
        max: f64,
    },

    #[error("round {round}: player {player} investment {investment} outside [0, {capital}]")]
    InvestmentOutOfRange {
        round: usize,
        player: usize,
        investment: f64,
        capital: f64,
    },

    #[error("round {round}: player {player} quantity {quantity} exceeds {max}")]
    QuantityOutOfRange {
        round: usize,
        player: usize,
        quantity: u32,
        max: u32,
    },

    #[error("input script ran out after {0} rounds")]
    ScriptExhausted(usize),

    #[error("invalid input script: {0}")]
    InvalidScript(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
