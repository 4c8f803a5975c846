use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use crate::data::types::{Market, PricePoint};
use crate::stats::engine::{payout_for, DerivedStats};
use crate::stats::history::synthetic_history;
use crate::stats::{round_half_up, StatsError};
use crate::view::bet::{AMOUNT_PRESETS, DEFAULT_AMOUNT};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const CHART_MONTHS: usize = 6;
const POINTS_PER_MONTH: usize = 5;
/// Average stake used to estimate the bettor count from pool size.
const AVG_STAKE_USD: f64 = 26.0;

/// One full-screen feed card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketCard {
    pub id: String,
    pub question: String,
    pub category: Option<String>,
    pub yes_label: String,
    pub no_label: String,
    pub yes_percent: i64,
    pub no_percent: i64,
    pub volume: String,
    pub liquidity: String,
    pub ends: Option<String>,
}

impl MarketCard {
    pub fn from_market(market: &Market) -> Self {
        let label = |i: usize, default: &str| {
            market.outcomes.get(i).cloned().unwrap_or_else(|| default.to_string())
        };

        Self {
            id: market.id.clone(),
            question: market.question.clone(),
            category: market.category.clone(),
            yes_label: label(0, "Yes"),
            no_label: label(1, "No"),
            yes_percent: percent(market.yes_price()),
            no_percent: percent(market.no_price()),
            volume: format_volume(&market.volume),
            liquidity: format_volume(&market.liquidity),
            ends: end_date(market).map(|d| d.format("%b %-d").to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub index: usize,
    pub price: f64,
    pub month: &'static str,
}

/// Everything the detail sheet renders for one market.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailView {
    pub market: Market,
    pub card: MarketCard,
    pub history: Vec<ChartPoint>,
    pub stats: DerivedStats,
    pub total_pool: String,
    pub estimated_bettors: String,
    pub days_remaining: Option<i64>,
    pub bet_presets: [u32; 5],
    pub default_bet: u32,
    pub potential_return: PotentialReturn,
}

/// Return on the default stake for each side. A side priced at zero has none.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PotentialReturn {
    pub stake: f64,
    pub yes: Option<f64>,
    pub no: Option<f64>,
    pub yes_display: Option<String>,
    pub no_display: Option<String>,
}

impl PotentialReturn {
    pub fn for_stake(market: &Market, stake: f64) -> Self {
        let yes = payout_for(market, 0, stake).ok();
        let no = payout_for(market, 1, stake).ok();

        Self {
            stake,
            yes,
            no,
            yes_display: yes.map(format_usd),
            no_display: no.map(format_usd),
        }
    }
}

impl DetailView {
    pub fn build(market: Market, now: DateTime<Utc>) -> Result<Self, StatsError> {
        let history = synthetic_history(&market);
        Self::with_history(market, &history, now)
    }

    pub fn with_history(
        market: Market,
        history: &[PricePoint],
        now: DateTime<Utc>,
    ) -> Result<Self, StatsError> {
        let stats = DerivedStats::compute(history)?;
        let pool = market.volume_usd();
        let days_remaining = end_date(&market).map(|end| (end - now).num_days().max(0));
        let labels = month_labels(now);

        let history = history
            .iter()
            .map(|p| ChartPoint {
                index: p.index,
                price: p.price,
                month: labels.get(p.index / POINTS_PER_MONTH).copied().unwrap_or(""),
            })
            .collect();

        Ok(Self {
            card: MarketCard::from_market(&market),
            potential_return: PotentialReturn::for_stake(&market, DEFAULT_AMOUNT as f64),
            market,
            history,
            stats,
            total_pool: format_volume_value(pool),
            estimated_bettors: format_count((pool / AVG_STAKE_USD).floor()),
            days_remaining,
            bet_presets: AMOUNT_PRESETS,
            default_bet: DEFAULT_AMOUNT,
        })
    }
}

/// Probability to whole percent (also the price in cents).
pub fn percent(price: f64) -> i64 {
    round_half_up(price * 100.0) as i64
}

/// `$12.5M`, `$850.0K`, `$999`. Unparseable input reads as zero.
pub fn format_volume(raw: &str) -> String {
    let value = raw.trim().parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0);
    format_volume_value(value)
}

fn format_volume_value(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("${:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("${:.1}K", value / 1_000.0)
    } else {
        format!("${:.0}", value)
    }
}

/// Dollars with cents, `$11.90`.
pub fn format_usd(value: f64) -> String {
    format!("${:.2}", value)
}

/// Compact count without a currency sign.
pub fn format_count(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        format!("{:.0}", value)
    }
}

fn end_date(market: &Market) -> Option<DateTime<Utc>> {
    market.end_date
        .as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Six trailing month names ending with the month of `now`.
fn month_labels(now: DateTime<Utc>) -> [&'static str; CHART_MONTHS] {
    let current = now.month0() as usize;
    let mut labels = [""; CHART_MONTHS];
    for (k, label) in labels.iter_mut().enumerate() {
        *label = MONTHS[(current + 12 + k + 1 - CHART_MONTHS) % 12];
    }
    labels
}
