// src/strategy/equilibrium.rs

//! Equilibrium calculations for the two duopoly games.
//!
//! The Cournot results come from the linear inverse-demand curve
//! `P = base - (q1 + q2) / 4` with a constant unit cost, which gives
//! a closed-form best response and a symmetric Nash quantity.

use crate::simulation::cournot::CournotMarket;
use serde::Serialize;

/// Profit-maximizing quantity given the opponent's quantity.
///
/// Formula: q* = (4 * base - q_opponent - 4 * cost) / 2, clamped to [0, max_quantity].
pub fn best_response(base_price: f64, cost_per_cup: f64, max_quantity: u32, opponent_q: f64) -> f64 {
    let raw = (4.0 * base_price - opponent_q - 4.0 * cost_per_cup) / 2.0;
    clamp_quantity(raw, max_quantity)
}

/// Symmetric Nash quantity, the fixed point of `best_response`.
///
/// Solving q = (4b - q - 4c) / 2 gives q = (4b - 4c) / 3.
pub fn nash_quantity(base_price: f64, cost_per_cup: f64, max_quantity: u32) -> f64 {
    let raw = (4.0 * base_price - 4.0 * cost_per_cup) / 3.0;
    clamp_quantity(raw, max_quantity)
}

fn clamp_quantity(q: f64, max_quantity: u32) -> f64 {
    q.min(max_quantity as f64).max(0.0)
}

/// One point of a best-response curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    #[serde(rename = "Opponent Quantity")]
    pub opponent_quantity: f64,
    #[serde(rename = "Best Response")]
    pub best_response: f64,
}

/// Samples the best-response curve at `samples` evenly spaced opponent
/// quantities from 0 to `max_quantity`, both ends included.
///
/// Both players share the curve; player 2's is the mirror image.
pub fn best_response_curve(market: &CournotMarket, samples: usize) -> Vec<CurvePoint> {
    let max_q = market.max_quantity as f64;
    match samples {
        0 => Vec::new(),
        1 => vec![CurvePoint {
            opponent_quantity: 0.0,
            best_response: market.best_response(0.0),
        }],
        n => {
            let step = max_q / (n - 1) as f64;
            (0..n)
                .map(|i| {
                    let q = if i == n - 1 { max_q } else { step * i as f64 };
                    CurvePoint {
                        opponent_quantity: q,
                        best_response: market.best_response(q),
                    }
                })
                .collect()
        }
    }
}

/// Human-readable best-response rule with the market's constants filled in.
pub fn best_response_equation(market: &CournotMarket) -> String {
    format!(
        "q* = ({} - q_opponent - {}) / 2, limited to [0, {}]",
        4.0 * market.base_price,
        4.0 * market.cost_per_cup,
        market.max_quantity
    )
}

/// Index of the Bertrand round with the highest joint profit.
///
/// This is the price pair highlighted on the price-strategy scatter.
/// Earliest round wins ties; `None` if nothing was played.
pub fn peak_joint_profit_round(p1_profits: &[f64], p2_profits: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, (a, b)) in p1_profits.iter().zip(p2_profits).enumerate() {
        let joint = a + b;
        match best {
            Some((_, top)) if joint <= top => {}
            _ => best = Some((i, joint)),
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::config::CournotConfig;
    use approx::assert_abs_diff_eq;

    #[test]
    fn nash_is_a_fixed_point_of_best_response() {
        let q = nash_quantity(5.0, 1.0, 10);
        assert_abs_diff_eq!(q, 16.0 / 3.0, epsilon = 1e-12);
        assert!((best_response(5.0, 1.0, 10, q) - q).abs() < 1e-9);
    }

    #[test]
    fn best_response_is_clamped() {
        assert_eq!(best_response(5.0, 1.0, 10, 0.0), 8.0);
        assert_eq!(best_response(5.0, 1.0, 10, 20.0), 0.0);
        assert_eq!(best_response(20.0, 1.0, 10, 0.0), 10.0);
        assert_eq!(nash_quantity(20.0, 1.0, 10), 10.0);
        assert_eq!(nash_quantity(1.0, 2.0, 10), 0.0);
    }

    #[test]
    fn curve_spans_the_quantity_range() {
        let market = CournotMarket::new(&CournotConfig::default());
        let curve = best_response_curve(&market, 100);
        assert_eq!(curve.len(), 100);
        assert_eq!(curve[0].opponent_quantity, 0.0);
        assert_eq!(curve[0].best_response, 8.0);
        assert_eq!(curve[99].opponent_quantity, 10.0);
        assert_eq!(curve[99].best_response, 3.0);
        assert!(curve.windows(2).all(|w| w[1].best_response <= w[0].best_response));
        assert!(best_response_curve(&market, 0).is_empty());
    }

    #[test]
    fn equation_uses_market_constants() {
        let market = CournotMarket::new(&CournotConfig::default());
        assert_eq!(
            best_response_equation(&market),
            "q* = (20 - q_opponent - 4) / 2, limited to [0, 10]"
        );
    }

    #[test]
    fn peak_round_prefers_earliest_maximum() {
        assert_eq!(peak_joint_profit_round(&[], &[]), None);
        assert_eq!(
            peak_joint_profit_round(&[0.0, 4000.0, 1500.0, 0.0], &[4000.0, 0.0, 1500.0, 10.0]),
            Some(0)
        );
        assert_eq!(peak_joint_profit_round(&[-10.0, -5.0], &[0.0, 0.0]), Some(1));
    }
}
