// src/simulation/engine.rs

use crate::simulation::bertrand::{BertrandMarket, BertrandOutcome};
use crate::simulation::config::{BertrandConfig, CournotConfig};
use crate::simulation::cournot::{CournotMarket, CournotOutcome};
use crate::simulation::error::SimError;
use crate::strategy::traits::{
    PriceDecision, PricingContext, PricingPolicy, QuantityContext, QuantityPolicy,
};
use tracing::info;

/// A Bertrand session: one market, two input policies, one round at a time.
///
/// Inputs are range-checked here, before they reach the market; the market
/// itself accepts anything.
pub struct BertrandSimulation {
    config: BertrandConfig,
    pub market: BertrandMarket,
    policies: [Box<dyn PricingPolicy>; 2],
    pub history: Vec<BertrandOutcome>,
}

impl BertrandSimulation {
    pub fn new(config: BertrandConfig, policies: [Box<dyn PricingPolicy>; 2]) -> Self {
        let market = BertrandMarket::new(&config);
        Self {
            config,
            market,
            policies,
            history: Vec::new(),
        }
    }

    /// Plays until the configured number of rounds is reached.
    /// Stops at the first rejected input, keeping every round played so far.
    /// A rejected round still uses up one move from each player, so calling
    /// `step` again continues both scripts in step.
    pub fn run(&mut self) -> Result<(), SimError> {
        while self.market.rounds_played() < self.config.rounds {
            self.step()?;
        }
        Ok(())
    }

    pub fn step(&mut self) -> Result<BertrandOutcome, SimError> {
        let round = self.market.round;

        // 1. Ask both players before checking either
        let contexts = [0, 1].map(|i| self.pricing_context(round, i));
        let [first, second] = [
            self.policies[0].decide(&contexts[0]),
            self.policies[1].decide(&contexts[1]),
        ];
        let decisions = [first?, second?];
        for (i, (ctx, decision)) in contexts.iter().zip(&decisions).enumerate() {
            check_pricing(ctx, i + 1, decision)?;
        }

        // 2. Resolve
        let [d1, d2] = decisions;
        let outcome = self
            .market
            .play_round(d1.price, d2.price, d1.investment, d2.investment);

        for (k, firm) in outcome.firms.iter().enumerate() {
            info!(
                round,
                player = k + 1,
                price = firm.price,
                units = firm.units_sold,
                profit = firm.profit,
                capital = firm.capital,
                "bertrand"
            );
        }

        self.history.push(outcome);
        Ok(outcome)
    }

    fn pricing_context(&self, round: usize, player: usize) -> PricingContext {
        let firm = &self.market.firms[player];
        PricingContext {
            round,
            capital: firm.capital,
            production_cost: firm.production_cost,
            min_price: self.config.min_price,
            max_price: self.config.max_price,
        }
    }
}

fn check_pricing(ctx: &PricingContext, player: usize, d: &PriceDecision) -> Result<(), SimError> {
    if !(d.price.is_finite() && (ctx.min_price..=ctx.max_price).contains(&d.price)) {
        return Err(SimError::PriceOutOfRange {
            round: ctx.round,
            player,
            price: d.price,
            min: ctx.min_price,
            max: ctx.max_price,
        });
    }
    // A firm in the red may only invest zero
    let budget = ctx.capital.max(0.0);
    if !(d.investment.is_finite() && (0.0..=budget).contains(&d.investment)) {
        return Err(SimError::InvestmentOutOfRange {
            round: ctx.round,
            player,
            investment: d.investment,
            capital: budget,
        });
    }
    Ok(())
}

/// A Cournot session: quantities from two policies, capped at `max_quantity`.
pub struct CournotSimulation {
    pub market: CournotMarket,
    policies: [Box<dyn QuantityPolicy>; 2],
    pub history: Vec<CournotOutcome>,
}

impl CournotSimulation {
    pub fn new(config: CournotConfig, policies: [Box<dyn QuantityPolicy>; 2]) -> Self {
        Self {
            market: CournotMarket::new(&config),
            policies,
            history: Vec::new(),
        }
    }

    /// Plays the planned rounds; on a rejected input the rounds already
    /// played stay in `market` and `history`.
    pub fn run(&mut self) -> Result<(), SimError> {
        while self.market.rounds_played() < self.market.num_rounds {
            self.step()?;
        }
        Ok(())
    }

    pub fn step(&mut self) -> Result<CournotOutcome, SimError> {
        let round = self.market.rounds_played() + 1;
        let ctx = QuantityContext {
            round,
            max_quantity: self.market.max_quantity,
        };

        // Both players move before either move is checked
        let [first, second] = [
            self.policies[0].decide(&ctx),
            self.policies[1].decide(&ctx),
        ];
        let quantities = [first?, second?];
        for (i, &q) in quantities.iter().enumerate() {
            if q > ctx.max_quantity {
                return Err(SimError::QuantityOutOfRange {
                    round: ctx.round,
                    player: i + 1,
                    quantity: q,
                    max: ctx.max_quantity,
                });
            }
        }

        let outcome = self.market.play_round(quantities[0], quantities[1]);
        info!(
            round,
            q1 = outcome.q1,
            q2 = outcome.q2,
            price = outcome.price,
            profit1 = outcome.profit1,
            profit2 = outcome.profit2,
            "cournot"
        );

        self.history.push(outcome);
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::reporting::to_csv_string;
    use crate::simulation::results::{bertrand_rows, cournot_rows};
    use crate::strategy::implementations::{
        RandomPricing, RandomQuantity, ScriptedPricing, ScriptedQuantity,
    };

    fn scripted(moves: &[(f64, f64)]) -> Box<dyn PricingPolicy> {
        Box::new(ScriptedPricing::new(
            moves
                .iter()
                .map(|&(price, investment)| PriceDecision { price, investment })
                .collect(),
        ))
    }

    fn random_bertrand(seed: u64, rounds: usize) -> BertrandSimulation {
        let config = BertrandConfig {
            rounds,
            ..BertrandConfig::default()
        };
        BertrandSimulation::new(
            config,
            [
                Box::new(RandomPricing::new(seed)),
                Box::new(RandomPricing::new(seed.wrapping_add(1))),
            ],
        )
    }

    #[test]
    fn scripted_bertrand_session() {
        let config = BertrandConfig {
            rounds: 2,
            ..BertrandConfig::default()
        };
        let mut sim = BertrandSimulation::new(
            config,
            [
                scripted(&[(100.0, 0.0), (85.0, 100.0)]),
                scripted(&[(90.0, 0.0), (85.0, 0.0)]),
            ],
        );
        sim.run().unwrap();

        assert_eq!(sim.history.len(), 2);
        assert_eq!(sim.history[0].firms[1].profit, 4000.0);
        assert_eq!(sim.history[0].firms[0].profit, 0.0);
        assert_eq!(sim.history[1].firms[0].units_sold, 50);
        assert_eq!(sim.market.round, 3);
    }

    #[test]
    fn rejects_inputs_outside_the_boundary() {
        let config = BertrandConfig {
            rounds: 3,
            ..BertrandConfig::default()
        };
        let mut sim = BertrandSimulation::new(
            config.clone(),
            [
                scripted(&[(90.0, 0.0), (200.0, 0.0)]),
                scripted(&[(95.0, 0.0), (95.0, 0.0)]),
            ],
        );
        let err = sim.run().unwrap_err();
        assert!(matches!(
            err,
            SimError::PriceOutOfRange {
                round: 2,
                player: 1,
                ..
            }
        ));
        // The good round stays on the books
        assert_eq!(sim.market.rounds_played(), 1);

        let mut sim = BertrandSimulation::new(
            config,
            [scripted(&[(90.0, 0.0)]), scripted(&[(95.0, 1000.5)])],
        );
        assert!(matches!(
            sim.step(),
            Err(SimError::InvestmentOutOfRange { player: 2, .. })
        ));
        assert_eq!(sim.market.rounds_played(), 0);
    }

    #[test]
    fn short_script_stops_the_run() {
        let config = BertrandConfig {
            rounds: 3,
            ..BertrandConfig::default()
        };
        let mut sim = BertrandSimulation::new(
            config,
            [scripted(&[(90.0, 0.0)]), scripted(&[(95.0, 0.0)])],
        );
        assert!(matches!(sim.run(), Err(SimError::ScriptExhausted(1))));
    }

    #[test]
    fn players_stay_in_step_after_a_rejected_round() {
        let mut sim = BertrandSimulation::new(
            BertrandConfig::default(),
            [
                scripted(&[(90.0, 0.0), (80.0, 0.0)]),
                scripted(&[(95.0, 1000.5), (85.0, 0.0)]),
            ],
        );
        assert!(sim.step().is_err());
        let out = sim.step().unwrap();
        assert_eq!(out.round, 1);
        assert_eq!(out.firms[0].price, 80.0);
        assert_eq!(out.firms[1].price, 85.0);

        let mut sim = CournotSimulation::new(
            CournotConfig::default(),
            [
                Box::new(ScriptedQuantity::new(vec![12, 3])),
                Box::new(ScriptedQuantity::new(vec![4, 6])),
            ],
        );
        assert!(matches!(
            sim.step(),
            Err(SimError::QuantityOutOfRange { player: 1, .. })
        ));
        let out = sim.step().unwrap();
        assert_eq!((out.q1, out.q2), (3, 6));
    }

    #[test]
    fn short_script_keeps_played_rows() {
        let config = CournotConfig {
            num_rounds: 6,
            ..CournotConfig::default()
        };
        let mut sim = CournotSimulation::new(
            config,
            [
                Box::new(ScriptedQuantity::new(vec![5, 2, 6, 5])),
                Box::new(ScriptedQuantity::new(vec![5, 4, 3, 5])),
            ],
        );
        assert!(matches!(sim.run(), Err(SimError::ScriptExhausted(4))));
        assert_eq!(sim.history.len(), 4);

        let rows = cournot_rows(&sim.market);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[3].round, 4);
        assert_eq!(rows[3].price, 2.5);
        assert_eq!(to_csv_string(&rows).unwrap().lines().count(), 5);

        let config = BertrandConfig {
            rounds: 3,
            ..BertrandConfig::default()
        };
        let mut sim = BertrandSimulation::new(
            config,
            [
                scripted(&[(100.0, 0.0), (85.0, 0.0)]),
                scripted(&[(90.0, 0.0), (85.0, 0.0)]),
            ],
        );
        assert!(sim.run().is_err());
        let rows = bertrand_rows(&sim.market);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].player2_profit, 4000.0);
    }

    #[test]
    fn random_bertrand_session_respects_bounds() {
        let mut sim = random_bertrand(42, 20);
        sim.run().unwrap();
        assert_eq!(sim.market.rounds_played(), 20);
        for firm in &sim.market.firms {
            assert!(firm.production_cost >= 30.0);
            assert!(firm.investments.iter().all(|&i| i >= 0.0));
        }
    }

    #[test]
    fn replay_is_identical() {
        let mut a = random_bertrand(9, 10);
        let mut b = random_bertrand(9, 10);
        a.run().unwrap();
        b.run().unwrap();
        assert_eq!(bertrand_rows(&a.market), bertrand_rows(&b.market));
        assert_eq!(
            to_csv_string(&bertrand_rows(&a.market)).unwrap(),
            to_csv_string(&bertrand_rows(&b.market)).unwrap()
        );

        let cournot = || {
            let mut sim = CournotSimulation::new(
                CournotConfig::default(),
                [Box::new(RandomQuantity::new(5)), Box::new(RandomQuantity::new(6))],
            );
            sim.run().unwrap();
            to_csv_string(&cournot_rows(&sim.market)).unwrap()
        };
        assert_eq!(cournot(), cournot());
    }

    #[test]
    fn scripted_cournot_session() {
        let config = CournotConfig {
            num_rounds: 2,
            ..CournotConfig::default()
        };
        let mut sim = CournotSimulation::new(
            config,
            [
                Box::new(ScriptedQuantity::new(vec![5, 2])),
                Box::new(ScriptedQuantity::new(vec![5, 4])),
            ],
        );
        sim.run().unwrap();
        assert_eq!(sim.history[0].price, 2.5);
        assert_eq!(sim.history[0].profit1, 7.5);
        assert_eq!(sim.history[1].price, 3.5);
        assert_eq!(cournot_rows(&sim.market).len(), 2);
    }

    #[test]
    fn cournot_rejects_oversized_quantity() {
        let mut sim = CournotSimulation::new(
            CournotConfig::default(),
            [
                Box::new(ScriptedQuantity::new(vec![4])),
                Box::new(ScriptedQuantity::new(vec![11])),
            ],
        );
        assert!(matches!(
            sim.step(),
            Err(SimError::QuantityOutOfRange {
                round: 1,
                player: 2,
                quantity: 11,
                max: 10
            })
        ));
        assert_eq!(sim.market.rounds_played(), 0);
    }
}
