use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use swipe_markets::config::{Config, EnvConfig};
use swipe_markets::data::cache::MarketCache;
use swipe_markets::data::gamma_api::GammaApiClient;
use swipe_markets::data::service::MarketService;
use swipe_markets::monitoring::logger::init_logging;
use swipe_markets::web::server::WebServer;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration (.env is read before any variable)
    let env_config = EnvConfig::load()?;
    let mut config = Config::load_or_default(&env_config.config_path)?;
    config.apply_env(&env_config);

    init_logging(&config.logging);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        upstream = %config.upstream.base_url,
        cache_ttl_secs = config.cache.ttl_secs,
        "swipe-markets starting"
    );

    let client = GammaApiClient::new(
        config.upstream.base_url.clone(),
        config.upstream.page_size,
        Duration::from_secs(config.upstream.timeout_secs),
    )?;
    let cache = MarketCache::new(Duration::from_secs(config.cache.ttl_secs));
    let markets = Arc::new(MarketService::new(client, cache));

    let server = WebServer::new(config.server.clone(), markets);
    server
        .start(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        })
        .await?;

    Ok(())
}
