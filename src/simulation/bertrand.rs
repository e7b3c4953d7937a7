// src/simulation/bertrand.rs

use crate::model::firm::Firm;
use crate::simulation::config::BertrandConfig;
use tracing::debug;

/// Units a firm sells against one rival under winner-take-most demand.
///
/// Strictly lower price takes the whole market; an exact tie splits it
/// with integer division.
pub fn units_for_prices(own_price: f64, other_price: f64, max_demand: u32) -> u32 {
    if own_price < other_price {
        max_demand
    } else if other_price < own_price {
        0
    } else {
        max_demand / 2
    }
}

/// What one firm saw in a single resolved round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FirmOutcome {
    pub price: f64,
    pub units_sold: u32,
    pub profit: f64,
    pub investment: f64,
    pub production_cost: f64, // After adjustment
    pub capital: f64,
}

impl FirmOutcome {
    fn snapshot(firm: &Firm, profit: f64, investment: f64) -> Self {
        Self {
            price: firm.price,
            units_sold: firm.units_sold,
            profit,
            investment,
            production_cost: firm.production_cost,
            capital: firm.capital,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BertrandOutcome {
    pub round: usize,
    pub firms: [FirmOutcome; 2],
}

/// Two firms competing on price for a fixed pool of demand.
#[derive(Debug, Clone, PartialEq)]
pub struct BertrandMarket {
    pub firms: [Firm; 2],
    /// Next round to be played; starts at 1.
    pub round: usize,
    pub max_demand: u32,
    cost_floor: f64,
}

impl BertrandMarket {
    pub fn new(config: &BertrandConfig) -> Self {
        Self {
            firms: [
                Firm::from_config("Player 1", config),
                Firm::from_config("Player 2", config),
            ],
            round: 1,
            max_demand: config.max_demand,
            cost_floor: config.cost_floor,
        }
    }

    /// Resolves one round. Inputs are not validated here.
    ///
    /// A negative investment collapses that firm's production cost to the
    /// cost floor (see `Firm::adjust_cost`).
    pub fn play_round(
        &mut self,
        p1_price: f64,
        p2_price: f64,
        p1_investment: f64,
        p2_investment: f64,
    ) -> BertrandOutcome {
        let round = self.round;

        // 1. Pricing
        self.firms[0].set_price(p1_price);
        self.firms[1].set_price(p2_price);

        // 2. Market resolution
        let units = [
            units_for_prices(p1_price, p2_price, self.max_demand),
            units_for_prices(p2_price, p1_price, self.max_demand),
        ];
        for (firm, sold) in self.firms.iter_mut().zip(units) {
            firm.record_sales(sold);
        }

        // 3. Profit, at the cost carried into this round
        let profits = [self.firms[0].book_profit(), self.firms[1].book_profit()];

        // 4. Investment, then cost adjustment for the next round
        let investments = [p1_investment, p2_investment];
        for (firm, investment) in self.firms.iter_mut().zip(investments) {
            firm.invest(investment);
            firm.adjust_cost(investment, self.max_demand, self.cost_floor);
        }

        debug!(
            round,
            p1_price,
            p2_price,
            p1_units = units[0],
            p2_units = units[1],
            p1_cost = self.firms[0].production_cost,
            p2_cost = self.firms[1].production_cost,
            "bertrand round resolved"
        );

        // 5. Advance
        self.round += 1;

        BertrandOutcome {
            round,
            firms: [
                FirmOutcome::snapshot(&self.firms[0], profits[0], investments[0]),
                FirmOutcome::snapshot(&self.firms[1], profits[1], investments[1]),
            ],
        }
    }

    pub fn rounds_played(&self) -> usize {
        self.round - 1
    }
}

impl Default for BertrandMarket {
    fn default() -> Self {
        Self::new(&BertrandConfig::default())
    }
}
