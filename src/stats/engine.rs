use serde::Serialize;
use crate::data::types::{Market, PricePoint};
use crate::stats::{round_half_up, round_to, StatsError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Trend {
    Bullish,
    Bearish,
    Neutral,
}

impl Trend {
    pub fn from_change(change_pct: Option<i64>) -> Self {
        match change_pct {
            Some(c) if c > 0 => Trend::Bullish,
            Some(c) if c < 0 => Trend::Bearish,
            _ => Trend::Neutral,
        }
    }
}

/// Presentation aggregates over a price series (percent units).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedStats {
    pub all_time_high: i64,
    pub all_time_low: i64,
    pub average: f64,
    /// Population standard deviation, in percentage points.
    pub volatility: f64,
    /// `None` when the series starts at zero.
    pub change_pct: Option<i64>,
    pub trend: Trend,
}

impl DerivedStats {
    pub fn compute(series: &[PricePoint]) -> Result<Self, StatsError> {
        let first = series.first().ok_or(StatsError::EmptySeries)?.price;
        let last = series[series.len() - 1].price;

        if let Some(bad) = series.iter().find(|p| !p.price.is_finite()) {
            return Err(StatsError::InvalidPrice(bad.price));
        }

        let n = series.len() as f64;
        let high = series.iter().map(|p| p.price).fold(f64::NEG_INFINITY, f64::max);
        let low = series.iter().map(|p| p.price).fold(f64::INFINITY, f64::min);
        let mean = series.iter().map(|p| p.price).sum::<f64>() / n;
        let variance = series
            .iter()
            .map(|p| (p.price - mean).powi(2))
            .sum::<f64>() / n;

        let change_pct = change_pct(first, last);

        Ok(Self {
            all_time_high: round_half_up(high) as i64,
            all_time_low: round_half_up(low) as i64,
            average: round_to(mean, 1),
            volatility: round_to(variance.sqrt(), 1),
            change_pct,
            trend: Trend::from_change(change_pct),
        })
    }
}

/// Percent change first to last, rounded; undefined from a zero start.
pub fn change_pct(first: f64, last: f64) -> Option<i64> {
    if first == 0.0 || !first.is_finite() || !last.is_finite() {
        return None;
    }
    Some(round_half_up((last - first) / first * 100.0) as i64)
}

/// Return on `stake` if an outcome priced at `price` resolves true.
pub fn potential_payout(stake: f64, price: f64) -> Result<f64, StatsError> {
    if !stake.is_finite() || stake <= 0.0 {
        return Err(StatsError::InvalidStake(stake));
    }
    if !price.is_finite() || !(0.0..=1.0).contains(&price) {
        return Err(StatsError::InvalidPrice(price));
    }
    if price == 0.0 {
        return Err(StatsError::ZeroPrice);
    }
    Ok(round_to(stake / price, 2))
}

pub fn payout_for(market: &Market, outcome_index: usize, stake: f64) -> Result<f64, StatsError> {
    potential_payout(stake, market.outcome_price(outcome_index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fallback::sample_markets;
    use crate::stats::history::synthetic_history;

    fn series(prices: &[f64]) -> Vec<PricePoint> {
        prices
            .iter()
            .enumerate()
            .map(|(index, &price)| PricePoint { index, price })
            .collect()
    }

    #[test]
    fn test_flat_series() {
        let stats = DerivedStats::compute(&series(&[10.0, 10.0, 10.0])).unwrap();

        assert_eq!(stats.volatility, 0.0);
        assert_eq!(stats.change_pct, Some(0));
        assert_eq!(stats.trend, Trend::Neutral);
        assert_eq!(stats.all_time_high, 10);
        assert_eq!(stats.all_time_low, 10);
        assert_eq!(stats.average, 10.0);
    }

    #[test]
    fn test_single_point() {
        let stats = DerivedStats::compute(&series(&[42.0])).unwrap();

        assert_eq!(stats.volatility, 0.0);
        assert_eq!(stats.change_pct, Some(0));
    }

    #[test]
    fn test_rising_series() {
        // mean 15, deviations -5, 0, 5 -> variance 50/3
        let stats = DerivedStats::compute(&series(&[10.0, 15.0, 20.0])).unwrap();

        assert_eq!(stats.all_time_high, 20);
        assert_eq!(stats.all_time_low, 10);
        assert_eq!(stats.average, 15.0);
        assert_eq!(stats.volatility, 4.1);
        assert_eq!(stats.change_pct, Some(100));
        assert_eq!(stats.trend, Trend::Bullish);
    }

    #[test]
    fn test_falling_series() {
        let stats = DerivedStats::compute(&series(&[40.0, 30.0])).unwrap();

        assert_eq!(stats.change_pct, Some(-25));
        assert_eq!(stats.trend, Trend::Bearish);
    }

    #[test]
    fn test_zero_start_has_no_change() {
        let stats = DerivedStats::compute(&series(&[0.0, 5.0])).unwrap();

        assert_eq!(stats.change_pct, None);
        assert_eq!(stats.trend, Trend::Neutral);
        assert!(stats.average.is_finite());
    }

    #[test]
    fn test_rejects_empty_and_non_finite() {
        assert_eq!(DerivedStats::compute(&[]), Err(StatsError::EmptySeries));
        assert!(matches!(
            DerivedStats::compute(&series(&[1.0, f64::NAN])),
            Err(StatsError::InvalidPrice(_))
        ));
    }

    #[test]
    fn test_extrema_bound_synthetic_series() {
        for market in sample_markets() {
            let history = synthetic_history(&market);
            let stats = DerivedStats::compute(&history).unwrap();

            assert!(stats.volatility >= 0.0);
            for p in &history {
                assert!(p.price <= stats.all_time_high as f64 + 0.5);
                assert!(p.price >= stats.all_time_low as f64 - 0.5);
            }
        }
    }

    #[test]
    fn test_payout() {
        assert_eq!(potential_payout(5.0, 0.42), Ok(11.9));
        assert_eq!(potential_payout(100.0, 0.5), Ok(200.0));
        assert_eq!(potential_payout(1.0, 1.0), Ok(1.0));
    }

    #[test]
    fn test_payout_guards() {
        assert_eq!(potential_payout(5.0, 0.0), Err(StatsError::ZeroPrice));
        assert_eq!(potential_payout(0.0, 0.4), Err(StatsError::InvalidStake(0.0)));
        assert_eq!(potential_payout(-1.0, 0.4), Err(StatsError::InvalidStake(-1.0)));
        assert_eq!(potential_payout(5.0, 1.5), Err(StatsError::InvalidPrice(1.5)));
        assert!(potential_payout(f64::INFINITY, 0.4).is_err());
    }

    #[test]
    fn test_payout_for_market() {
        let market = &sample_markets()[0];

        assert_eq!(payout_for(market, 0, 5.0), Ok(11.9));
        assert_eq!(payout_for(market, 1, 5.0), Ok(8.62));
    }
}
