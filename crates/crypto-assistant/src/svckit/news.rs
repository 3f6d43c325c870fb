//! News Lookup

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use super::Lookup;
use crate::cache::TtlCache;
use crate::feeds::NewsFeed;
use crate::model::NewsItem;

/// Cached, truncated news lookup
pub struct NewsLookup {
    feed: Arc<dyn NewsFeed>,
    cache: TtlCache<String, Vec<NewsItem>>,
    limit: usize,
}

impl NewsLookup {
    pub fn new(feed: Arc<dyn NewsFeed>, limit: usize, cache_ttl: Duration) -> Self {
        Self {
            feed,
            cache: TtlCache::new(cache_ttl),
            limit,
        }
    }

    /// At most `limit` rising headlines for `ticker`; empty plus a warning on failure
    pub async fn fetch_news(&self, ticker: &str) -> Lookup<Vec<NewsItem>> {
        let ticker = ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return Lookup::ok(Vec::new());
        }

        if let Some(items) = self.cache.get(&ticker) {
            return Lookup::ok(items);
        }

        match self.feed.rising_posts(&ticker).await {
            Ok(mut items) => {
                items.truncate(self.limit);
                // Only non-empty answers are cached.
                if !items.is_empty() {
                    self.cache.insert(ticker, items.clone());
                }
                Lookup::ok(items)
            }
            Err(e) => {
                warn!(ticker = %ticker, error = %e, "News lookup failed");
                Lookup::degraded(
                    Vec::new(),
                    format!("Error fetching news from {}: {}", self.feed.name(), e),
                )
            }
        }
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
