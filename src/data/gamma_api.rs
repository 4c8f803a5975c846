use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use crate::data::types::Market;

pub struct GammaApiClient {
    client: Client,
    base_url: String,
    page_size: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(#[source] reqwest::Error),

    #[error("Upstream rejected request: HTTP {0}")]
    UpstreamRejected(u16),

    #[error("Upstream response malformed: {0}")]
    UpstreamMalformed(String),
}

impl GammaApiClient {
    pub fn new(base_url: String, page_size: usize, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            page_size,
        })
    }

    /// Active markets, highest volume first.
    pub fn markets_url(&self) -> String {
        format!(
            "{}/markets?closed=false&limit={}&order=volume&ascending=false",
            self.base_url, self.page_size
        )
    }

    /// Fetch one page of active markets and normalize it.
    pub async fn fetch_markets(&self) -> Result<Vec<Market>, IngestError> {
        let url = self.markets_url();

        let response = self.client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(IngestError::UpstreamUnavailable)?;

        let status = response.status();
        if !status.is_success() {
            return Err(IngestError::UpstreamRejected(status.as_u16()));
        }

        let body: Value = response.json().await.map_err(|e| {
            if e.is_decode() {
                IngestError::UpstreamMalformed(e.to_string())
            } else {
                IngestError::UpstreamUnavailable(e)
            }
        })?;

        normalize_page(body)
    }
}

/// Accepts a bare array or an object wrapping it under `data` / `markets`.
pub fn normalize_page(body: Value) -> Result<Vec<Market>, IngestError> {
    let records = match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("data").or_else(|| map.remove("markets")) {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(IngestError::UpstreamMalformed(
                    "object body without a market array".to_string(),
                ))
            }
        },
        other => {
            return Err(IngestError::UpstreamMalformed(format!(
                "expected a market array, got {}",
                json_kind(&other)
            )))
        }
    };

    let total = records.len();
    let markets: Vec<Market> = records
        .iter()
        .enumerate()
        .filter_map(|(position, raw)| normalize_market(raw, position))
        .collect();

    if markets.len() < total {
        debug!(dropped = total - markets.len(), "Dropped upstream records without a question");
    }

    if markets.is_empty() {
        return Err(IngestError::UpstreamMalformed("no usable markets in response".to_string()));
    }

    Ok(markets)
}

/// Map one loosely-typed upstream record onto the canonical `Market`.
///
/// Only `question` is required; every other field has a default:
///
/// | field            | sources (first usable wins)                          | default          |
/// |------------------|------------------------------------------------------|------------------|
/// | `id`             | `id`, `condition_id`, `conditionId`, `slug`          | `market-<pos>`   |
/// | `outcomes`       | `outcomes` (array or JSON-encoded array, len >= 2)   | `["Yes","No"]`   |
/// | `outcome_prices` | `outcomePrices` aligned with outcomes, all in [0,1]  | `bestAsk`, `1 - bestAsk` |
/// | `volume`         | `volume`, `volumeNum`                                | `"0"`            |
/// | `liquidity`      | `liquidity`, `liquidityNum`                          | `"0"`            |
/// | `end_date`       | `endDate`, `end_date_iso`, `endDateIso`              | none             |
/// | `category`       | `category`, first string tag, first tag's `label`    | none             |
pub fn normalize_market(raw: &Value, position: usize) -> Option<Market> {
    let question = text_field(raw, "question")?;

    let id = ["id", "condition_id", "conditionId", "slug"]
        .iter()
        .find_map(|key| text_field(raw, key))
        .unwrap_or_else(|| format!("market-{}", position));

    let (outcomes, outcome_prices) = resolve_outcomes(raw);

    Some(Market {
        id,
        question,
        description: text_field(raw, "description"),
        outcomes,
        outcome_prices,
        volume: first_magnitude(raw, &["volume", "volumeNum"]),
        liquidity: first_magnitude(raw, &["liquidity", "liquidityNum"]),
        end_date: ["endDate", "end_date_iso", "endDateIso"]
            .iter()
            .find_map(|key| text_field(raw, key)),
        category: text_field(raw, "category").or_else(|| category_from_tags(raw.get("tags"))),
        image: text_field(raw, "image"),
        slug: text_field(raw, "slug"),
    })
}

fn resolve_outcomes(raw: &Value) -> (Vec<String>, Vec<String>) {
    let outcomes = raw
        .get("outcomes")
        .map(parse_json_string_or_array)
        .filter(|o| o.len() >= 2)
        .unwrap_or_else(yes_no);

    let prices = raw
        .get("outcomePrices")
        .map(parse_json_string_or_array)
        .filter(|p| p.len() == outcomes.len() && p.iter().all(|v| parse_probability(v).is_some()));

    match prices {
        Some(prices) => (outcomes, prices),
        None => {
            let outcomes = if outcomes.len() == 2 { outcomes } else { yes_no() };
            (outcomes, prices_from_best_ask(raw.get("bestAsk")))
        }
    }
}

/// Two-outcome prices from a best ask; a missing or malformed ask reads as 0.5.
pub fn prices_from_best_ask(best_ask: Option<&Value>) -> Vec<String> {
    let ask = best_ask
        .and_then(|v| match v {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        })
        .filter(|p| p.is_finite() && (0.0..=1.0).contains(p))
        .unwrap_or(0.5);

    vec![ask.to_string(), (1.0 - ask).to_string()]
}

fn yes_no() -> Vec<String> {
    vec!["Yes".to_string(), "No".to_string()]
}

fn parse_probability(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && (0.0..=1.0).contains(p))
}

/// Gamma sends list fields either as arrays or as JSON-encoded array strings.
fn parse_json_string_or_array(val: &Value) -> Vec<String> {
    let items = match val {
        Value::Array(arr) => arr.clone(),
        Value::String(s) => serde_json::from_str::<Vec<Value>>(s).unwrap_or_default(),
        _ => Vec::new(),
    };

    items
        .iter()
        .filter_map(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .collect()
}

fn first_magnitude(raw: &Value, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| {
            let text = text_field(raw, key)?;
            let value = text.parse::<f64>().ok()?;
            (value.is_finite() && value >= 0.0).then_some(text)
        })
        .unwrap_or_else(|| "0".to_string())
}

fn category_from_tags(tags: Option<&Value>) -> Option<String> {
    let tags = tags?.as_array()?;

    tags.iter()
        .find_map(|t| t.as_str().map(str::to_string))
        .or_else(|| {
            tags.first()
                .and_then(|t| t.get("label"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .filter(|c| !c.trim().is_empty())
}

/// Non-empty string, or a number rendered as text.
fn text_field(raw: &Value, key: &str) -> Option<String> {
    match raw.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
