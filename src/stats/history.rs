//! Synthetic price history.
//!
//! Gamma's market listing carries no price history, so the detail view is fed
//! a seeded random walk that ends at the live price. It is a cosmetic
//! placeholder for the chart, not a market simulation, and should be replaced
//! by real history once an upstream series is wired in.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use crate::data::types::{Market, PricePoint};

pub const HISTORY_LEN: usize = 30;
pub const MIN_PRICE: f64 = 0.01;
pub const MAX_PRICE: f64 = 0.99;

/// Largest per-step move, in probability units.
const MAX_STEP: f64 = 0.04;
/// How far from the live price the walk may start.
const START_SPREAD: f64 = 0.15;

/// Same market and price always yield the same series.
pub fn synthetic_history(market: &Market) -> Vec<PricePoint> {
    let current = market.yes_price();
    let mut rng = StdRng::seed_from_u64(seed_for(&market.id, current));
    random_walk(&mut rng, current, HISTORY_LEN)
}

pub fn random_walk<R: Rng>(rng: &mut R, current: f64, len: usize) -> Vec<PricePoint> {
    if len == 0 {
        return Vec::new();
    }

    let current = current.clamp(0.0, 1.0);
    let mut value = clamp_price(current + rng.gen_range(-START_SPREAD..=START_SPREAD));
    let mut points = Vec::with_capacity(len);

    for index in 0..len - 1 {
        points.push(PricePoint { index, price: value * 100.0 });
        value = clamp_price(value + rng.gen_range(-MAX_STEP..=MAX_STEP));
    }

    // Pinned to the live quote.
    points.push(PricePoint { index: len - 1, price: current * 100.0 });
    points
}

fn clamp_price(p: f64) -> f64 {
    p.clamp(MIN_PRICE, MAX_PRICE)
}

fn seed_for(id: &str, price: f64) -> u64 {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    price.to_bits().hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fallback::sample_markets;

    #[test]
    fn test_series_ends_at_live_price() {
        for market in sample_markets() {
            let series = synthetic_history(&market);

            assert_eq!(series.len(), HISTORY_LEN);
            let last = series.last().unwrap();
            assert_eq!(last.index, HISTORY_LEN - 1);
            assert!((last.price - market.yes_price() * 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_walk_stays_in_band() {
        let mut rng = StdRng::seed_from_u64(7);
        let series = random_walk(&mut rng, 0.98, 500);

        for point in &series[..series.len() - 1] {
            assert!(point.price >= MIN_PRICE * 100.0 - 1e-9);
            assert!(point.price <= MAX_PRICE * 100.0 + 1e-9);
        }
        assert_eq!(series.last().unwrap().price, 98.0);
    }

    #[test]
    fn test_indices_are_sequential() {
        let mut rng = StdRng::seed_from_u64(1);
        let series = random_walk(&mut rng, 0.5, 10);

        for (i, point) in series.iter().enumerate() {
            assert_eq!(point.index, i);
        }
    }

    #[test]
    fn test_deterministic_per_market() {
        let market = &sample_markets()[0];
        assert_eq!(synthetic_history(market), synthetic_history(market));
    }

    #[test]
    fn test_degenerate_lengths() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(random_walk(&mut rng, 0.4, 0).is_empty());

        let single = random_walk(&mut rng, 0.4, 1);
        assert_eq!(single, vec![PricePoint { index: 0, price: 40.0 }]);
    }
}
