use serde::{Deserialize, Serialize};

/// Canonical market record, as served on `/api/markets`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    pub id: String,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub outcomes: Vec<String>,
    pub outcome_prices: Vec<String>,
    pub volume: String,
    pub liquidity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

impl Market {
    /// Price of the outcome at `index`, 0.5 when missing or unparseable.
    pub fn outcome_price(&self, index: usize) -> f64 {
        self.outcome_prices
            .get(index)
            .and_then(|p| p.parse::<f64>().ok())
            .filter(|p| p.is_finite())
            .unwrap_or(0.5)
    }

    /// Current resolved probability of the first ("Yes") outcome.
    pub fn yes_price(&self) -> f64 {
        self.outcome_price(0)
    }

    pub fn no_price(&self) -> f64 {
        self.outcome_price(1)
    }

    pub fn volume_usd(&self) -> f64 {
        parse_magnitude(&self.volume)
    }
}

/// One point of a price series, `price` in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub index: usize,
    pub price: f64,
}

fn parse_magnitude(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn market(prices: &[&str]) -> Market {
        Market {
            id: "1".to_string(),
            question: "Q?".to_string(),
            description: None,
            outcomes: vec!["Yes".to_string(), "No".to_string()],
            outcome_prices: prices.iter().map(|p| p.to_string()).collect(),
            volume: "12500000".to_string(),
            liquidity: "abc".to_string(),
            end_date: None,
            category: None,
            image: None,
            slug: None,
        }
    }

    #[test]
    fn test_outcome_price_defaults() {
        let m = market(&["0.42"]);
        assert_eq!(m.yes_price(), 0.42);
        assert_eq!(m.no_price(), 0.5);
    }

    #[test]
    fn test_magnitudes() {
        let m = market(&["0.42", "0.58"]);
        assert_eq!(m.volume_usd(), 12_500_000.0);

        let mut bad = m.clone();
        bad.volume = "abc".to_string();
        assert_eq!(bad.volume_usd(), 0.0);
    }

    #[test]
    fn test_serializes_camel_case_and_skips_absent() {
        let json = serde_json::to_value(market(&["0.42", "0.58"])).unwrap();

        assert_eq!(json["outcomePrices"][0], "0.42");
        assert!(json.get("endDate").is_none());
        assert!(json.get("category").is_none());
    }
}
