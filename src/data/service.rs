use std::sync::Arc;
use tracing::{debug, info, warn};
use crate::data::cache::MarketCache;
use crate::data::fallback::sample_markets;
use crate::data::gamma_api::{GammaApiClient, IngestError};
use crate::data::types::Market;

/// Market ingestion: one upstream attempt, cached on success, sample feed on failure.
pub struct MarketService {
    client: GammaApiClient,
    cache: MarketCache,
}

impl MarketService {
    pub fn new(client: GammaApiClient, cache: MarketCache) -> Self {
        Self { client, cache }
    }

    /// Never empty and never an error.
    pub async fn fetch_markets(&self) -> Arc<Vec<Market>> {
        let key = self.client.markets_url();

        if let Some(markets) = self.cache.get(&key) {
            debug!(count = markets.len(), "Serving markets from cache");
            return markets;
        }

        match self.client.fetch_markets().await {
            Ok(markets) => {
                info!(count = markets.len(), "Fetched markets from upstream");
                let markets = Arc::new(markets);
                self.cache.insert(key, Arc::clone(&markets));
                debug!(pages = self.cache.len(), "Cached upstream page");
                markets
            }
            Err(err) => {
                warn!(kind = error_kind(&err), error = %err, "Upstream fetch failed, serving sample markets");
                Arc::new(sample_markets())
            }
        }
    }

    pub async fn find(&self, id: &str) -> Option<Market> {
        self.fetch_markets()
            .await
            .iter()
            .find(|m| m.id == id)
            .cloned()
    }
}

fn error_kind(err: &IngestError) -> &'static str {
    match err {
        IngestError::UpstreamUnavailable(_) => "unavailable",
        IngestError::UpstreamRejected(_) => "rejected",
        IngestError::UpstreamMalformed(_) => "malformed",
    }
}
