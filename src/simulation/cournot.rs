// src/simulation/cournot.rs

use crate::simulation::config::CournotConfig;
use crate::strategy::equilibrium;
use tracing::debug;

/// Everything one Cournot round produced, in display order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CournotOutcome {
    pub q1: u32,
    pub q2: u32,
    pub price: f64,
    pub profit1: f64,
    pub profit2: f64,
}

/// The lemonade-stand market: two sellers choose how many cups to make and
/// a single clearing price follows from the total.
#[derive(Debug, Clone, PartialEq)]
pub struct CournotMarket {
    /// Planned length of the session. Playing past it is allowed.
    pub num_rounds: usize,

    // Parallel histories, one entry per played round
    pub player1_quantities: Vec<u32>,
    pub player2_quantities: Vec<u32>,
    pub prices: Vec<f64>,
    pub player1_profits: Vec<f64>,
    pub player2_profits: Vec<f64>,

    pub base_price: f64,
    pub cost_per_cup: f64,
    pub max_quantity: u32,
}

impl CournotMarket {
    pub fn new(config: &CournotConfig) -> Self {
        Self {
            num_rounds: config.num_rounds,
            player1_quantities: Vec::new(),
            player2_quantities: Vec::new(),
            prices: Vec::new(),
            player1_profits: Vec::new(),
            player2_profits: Vec::new(),
            base_price: config.base_price,
            cost_per_cup: config.cost_per_cup,
            max_quantity: config.max_quantity,
        }
    }

    /// Linear inverse demand, floored at half the base price.
    pub fn calculate_price(&self, q1: u32, q2: u32) -> f64 {
        let total = q1 as f64 + q2 as f64;
        (self.base_price - total / 4.0).max(self.base_price / 2.0)
    }

    /// Revenue minus production cost, never below zero.
    pub fn calculate_profit(&self, price: f64, quantity: u32) -> f64 {
        let revenue = price * quantity as f64;
        let cost = self.cost_per_cup * quantity as f64;
        (revenue - cost).max(0.0)
    }

    pub fn play_round(&mut self, q1: u32, q2: u32) -> CournotOutcome {
        let price = self.calculate_price(q1, q2);
        let profit1 = self.calculate_profit(price, q1);
        let profit2 = self.calculate_profit(price, q2);

        self.player1_quantities.push(q1);
        self.player2_quantities.push(q2);
        self.prices.push(price);
        self.player1_profits.push(profit1);
        self.player2_profits.push(profit2);

        debug!(
            round = self.rounds_played(),
            q1, q2, price, profit1, profit2, "cournot round resolved"
        );

        CournotOutcome {
            q1,
            q2,
            price,
            profit1,
            profit2,
        }
    }

    pub fn best_response(&self, opponent_q: f64) -> f64 {
        equilibrium::best_response(self.base_price, self.cost_per_cup, self.max_quantity, opponent_q)
    }

    /// Symmetric equilibrium quantity; used for plotting, not for play.
    pub fn nash_quantity(&self) -> f64 {
        equilibrium::nash_quantity(self.base_price, self.cost_per_cup, self.max_quantity)
    }

    pub fn rounds_played(&self) -> usize {
        self.player1_quantities.len()
    }
}

impl Default for CournotMarket {
    fn default() -> Self {
        Self::new(&CournotConfig::default())
    }
}
