// src/strategy/implementations.rs

use crate::simulation::error::SimError;
use crate::strategy::traits::{
    PriceDecision, PricingContext, PricingPolicy, QuantityContext, QuantityPolicy,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Uniform};
use std::collections::VecDeque;

// =========================================================================
// 1. Random Pricing
// =========================================================================

/// Posts a uniform random price between the firm's production cost and the
/// price ceiling, and invests a uniform random share of current capital.
///
/// Seeded, so a session can be replayed exactly.
#[derive(Debug, Clone)]
pub struct RandomPricing {
    rng: ChaCha8Rng,
}

impl RandomPricing {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl PricingPolicy for RandomPricing {
    fn decide(&mut self, ctx: &PricingContext) -> Result<PriceDecision, SimError> {
        // Never draw below the accepted range, never above the ceiling
        let low = ctx.production_cost.max(ctx.min_price).min(ctx.max_price);
        let price = Uniform::new_inclusive(low, ctx.max_price).sample(&mut self.rng);

        // Nothing to invest once capital is gone
        let budget = ctx.capital.max(0.0);
        let investment = Uniform::new_inclusive(0.0, budget).sample(&mut self.rng);

        Ok(PriceDecision { price, investment })
    }
}

// =========================================================================
// 2. Scripted Pricing
// =========================================================================

/// Replays a fixed list of decisions, one per round.
#[derive(Debug, Clone)]
pub struct ScriptedPricing {
    moves: VecDeque<PriceDecision>,
    served: usize,
}

impl ScriptedPricing {
    pub fn new(moves: Vec<PriceDecision>) -> Self {
        Self {
            moves: moves.into(),
            served: 0,
        }
    }
}

impl PricingPolicy for ScriptedPricing {
    fn decide(&mut self, _ctx: &PricingContext) -> Result<PriceDecision, SimError> {
        let next = self
            .moves
            .pop_front()
            .ok_or(SimError::ScriptExhausted(self.served))?;
        self.served += 1;
        Ok(next)
    }
}

// =========================================================================
// 3. Random Quantity
// =========================================================================

/// Produces a uniform random whole number of cups in `0..=max_quantity`.
#[derive(Debug, Clone)]
pub struct RandomQuantity {
    rng: ChaCha8Rng,
}

impl RandomQuantity {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl QuantityPolicy for RandomQuantity {
    fn decide(&mut self, ctx: &QuantityContext) -> Result<u32, SimError> {
        Ok(self.rng.gen_range(0..=ctx.max_quantity))
    }
}

// =========================================================================
// 4. Scripted Quantity
// =========================================================================

#[derive(Debug, Clone)]
pub struct ScriptedQuantity {
    quantities: VecDeque<u32>,
    served: usize,
}

impl ScriptedQuantity {
    pub fn new(quantities: Vec<u32>) -> Self {
        Self {
            quantities: quantities.into(),
            served: 0,
        }
    }
}

impl QuantityPolicy for ScriptedQuantity {
    fn decide(&mut self, _ctx: &QuantityContext) -> Result<u32, SimError> {
        let next = self
            .quantities
            .pop_front()
            .ok_or(SimError::ScriptExhausted(self.served))?;
        self.served += 1;
        Ok(next)
    }
}
