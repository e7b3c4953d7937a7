// src/strategy/traits.rs

use crate::simulation::error::SimError;
use std::fmt::Debug;

/// What a pricing policy can see about its own firm before deciding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingContext {
    pub round: usize,
    pub capital: f64,
    pub production_cost: f64,
    pub min_price: f64,
    pub max_price: f64,
}

/// A Bertrand move: the posted price and how much to invest in cost cuts.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PriceDecision {
    pub price: f64,
    pub investment: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantityContext {
    pub round: usize,
    pub max_quantity: u32,
}

/// Supplies one firm's Bertrand decisions, round by round.
///
/// Policies stand in for the player at the keyboard; the session checks
/// whatever they return before it reaches the market.
pub trait PricingPolicy: Debug + Send {
    fn decide(&mut self, ctx: &PricingContext) -> Result<PriceDecision, SimError>;
}

/// Supplies one player's Cournot quantities, round by round.
pub trait QuantityPolicy: Debug + Send {
    fn decide(&mut self, ctx: &QuantityContext) -> Result<u32, SimError>;
}
