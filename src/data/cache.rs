use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use crate::data::types::Market;

/// Read-through page cache keyed by upstream URL.
pub struct MarketCache {
    cache: DashMap<String, CachedPage>,
    ttl: Duration,
}

struct CachedPage {
    markets: Arc<Vec<Market>>,
    timestamp: Instant,
}

impl MarketCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: DashMap::new(),
            ttl,
        }
    }

    pub fn insert(&self, key: String, markets: Arc<Vec<Market>>) {
        self.cache.insert(key, CachedPage {
            markets,
            timestamp: Instant::now(),
        });
    }

    /// Get page if not expired (evict on read)
    pub fn get(&self, key: &str) -> Option<Arc<Vec<Market>>> {
        let entry = self.cache.get(key)?;
        if entry.timestamp.elapsed() > self.ttl {
            drop(entry); // Drop the read lock
            self.cache.remove(key);
            None
        } else {
            Some(Arc::clone(&entry.markets))
        }
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl Default for MarketCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(60))
    }
}
