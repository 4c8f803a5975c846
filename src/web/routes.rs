//! HTTP route handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::{json, Value};

use crate::data::types::Market;
use crate::view::bet::{BetPreview, BetRequest, BetSlip};
use crate::view::card::DetailView;

use super::error::ApiError;
use super::server::AppState;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/markets", get(markets))
        .route("/api/markets/{id}", get(market_detail))
        .route("/api/bets/preview", post(preview_bet))
        .route("/api/bets", post(place_bet))
        .route("/health", get(health))
}

/// GET /api/markets: always 200, sample markets when upstream is down.
async fn markets(State(state): State<AppState>) -> Json<Value> {
    let markets = state.markets.fetch_markets().await;
    Json(json!({ "markets": markets.as_slice() }))
}

/// GET /api/markets/{id}: detail sheet for one market in the current feed.
async fn market_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DetailView>, ApiError> {
    let market = find_market(&state, &id).await?;
    let view = DetailView::build(market, Utc::now())
        .map_err(|e| ApiError::Internal(format!("stats for market {}: {}", id, e)))?;
    Ok(Json(view))
}

/// POST /api/bets/preview: potential return for a stake.
async fn preview_bet(
    State(state): State<AppState>,
    body: Result<Json<BetRequest>, JsonRejection>,
) -> Result<Json<BetPreview>, ApiError> {
    let Json(req) = body?;
    let market = find_market(&state, &req.market_id).await?;
    let preview = BetSlip::new(&market, req.outcome, req.amount)?.preview()?;
    Ok(Json(preview))
}

/// POST /api/bets: validated, then refused until a wallet is integrated.
async fn place_bet(
    State(state): State<AppState>,
    body: Result<Json<BetRequest>, JsonRejection>,
) -> Result<Json<BetPreview>, ApiError> {
    let Json(req) = body?;
    let market = find_market(&state, &req.market_id).await?;
    let placed = BetSlip::new(&market, req.outcome, req.amount)?.place()?;
    Ok(Json(placed))
}

/// GET /health: simple health check.
async fn health() -> &'static str {
    "ok"
}

async fn find_market(state: &AppState, id: &str) -> Result<Market, ApiError> {
    state.markets
        .find(id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("market {}", id)))
}
