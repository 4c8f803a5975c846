use serde::{Deserialize, Serialize};
use crate::data::types::Market;
use crate::stats::engine::potential_payout;
use crate::stats::StatsError;
use crate::view::card::{format_usd, percent};

pub const AMOUNT_PRESETS: [u32; 5] = [1, 5, 10, 25, 100];
pub const DEFAULT_AMOUNT: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Yes,
    No,
}

impl Outcome {
    pub fn index(self) -> usize {
        match self {
            Outcome::Yes => 0,
            Outcome::No => 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetRequest {
    pub market_id: String,
    pub outcome: Outcome,
    #[serde(default = "default_amount")]
    pub amount: f64,
}

fn default_amount() -> f64 {
    DEFAULT_AMOUNT as f64
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BetPreview {
    pub market_id: String,
    pub outcome: Outcome,
    pub outcome_label: String,
    pub price: f64,
    pub percent: i64,
    pub amount: f64,
    pub potential_return: f64,
    pub potential_return_display: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BetError {
    #[error("Market has no {0:?} outcome")]
    UnknownOutcome(Outcome),

    #[error("Invalid bet amount: {0}")]
    InvalidAmount(f64),

    #[error("Cannot price bet: {0}")]
    Pricing(#[from] StatsError),

    #[error("Wallet integration coming soon")]
    WalletUnavailable,
}

/// A pending bet on one outcome. Placement is not wired to a wallet.
#[derive(Debug, Clone)]
pub struct BetSlip<'a> {
    market: &'a Market,
    outcome: Outcome,
    amount: f64,
}

impl<'a> BetSlip<'a> {
    pub fn new(market: &'a Market, outcome: Outcome, amount: f64) -> Result<Self, BetError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(BetError::InvalidAmount(amount));
        }
        if market.outcomes.len() <= outcome.index() {
            return Err(BetError::UnknownOutcome(outcome));
        }
        Ok(Self { market, outcome, amount })
    }

    pub fn preview(&self) -> Result<BetPreview, BetError> {
        let index = self.outcome.index();
        let price = self.market.outcome_price(index);
        let potential_return = potential_payout(self.amount, price)?;

        Ok(BetPreview {
            market_id: self.market.id.clone(),
            outcome: self.outcome,
            outcome_label: self.market.outcomes[index].clone(),
            price,
            percent: percent(price),
            amount: self.amount,
            potential_return,
            potential_return_display: format_usd(potential_return),
        })
    }

    /// Validates the slip, then refuses: there is no wallet to execute against.
    pub fn place(&self) -> Result<BetPreview, BetError> {
        let preview = self.preview()?;
        tracing::info!(
            market_id = %preview.market_id,
            outcome = ?preview.outcome,
            amount = preview.amount,
            "Bet placement requested without wallet"
        );
        Err(BetError::WalletUnavailable)
    }
}
