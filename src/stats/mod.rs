pub mod engine;
pub mod history;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StatsError {
    #[error("Price series is empty")]
    EmptySeries,

    #[error("Outcome price is zero, payout is unbounded")]
    ZeroPrice,

    #[error("Invalid price: {0}")]
    InvalidPrice(f64),

    #[error("Invalid stake: {0}")]
    InvalidStake(f64),
}

/// Round half up, so -2.5 becomes -2.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    round_half_up(value * scale) / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.6), -3.0);
        assert_eq!(round_to(11.904761, 2), 11.9);
        assert_eq!(round_to(7.25, 1), 7.3);
    }
}
