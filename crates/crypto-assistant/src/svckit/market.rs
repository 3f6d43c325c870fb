//! Market Snapshot Lookup
//!
//! Pulls one page of listings (top `limit` by market cap) and scans it for
//! the coin. A coin ranked below the page size is never found.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::Lookup;
use crate::cache::TtlCache;
use crate::feeds::MarketListings;
use crate::model::{CoinId, MarketSnapshot};

/// First entry within the first `limit` listings whose name or symbol
/// matches `coin`, ignoring case
pub fn find_listing<'a>(listings: &'a [MarketSnapshot], coin: &str, limit: usize) -> Option<&'a MarketSnapshot> {
    if coin.is_empty() {
        return None;
    }
    listings.iter().take(limit).find(|listing| listing.matches(coin))
}

/// Cached listings scan
pub struct MarketLookup {
    listings: Arc<dyn MarketListings>,
    cache: TtlCache<usize, Vec<MarketSnapshot>>,
    limit: usize,
}

impl MarketLookup {
    pub fn new(listings: Arc<dyn MarketListings>, limit: usize, cache_ttl: Duration) -> Self {
        Self {
            listings,
            cache: TtlCache::new(cache_ttl),
            limit,
        }
    }

    /// Snapshot for `coin`; `None` when not listed or when the feed failed
    pub async fn fetch_market(&self, coin: &CoinId) -> Lookup<Option<MarketSnapshot>> {
        if coin.is_empty() {
            return Lookup::ok(None);
        }

        let listings = match self.cache.get(&self.limit) {
            Some(listings) => listings,
            None => match self.listings.latest_listings(self.limit).await {
                Ok(listings) => {
                    debug!(count = listings.len(), "Fetched market listings");
                    self.cache.insert(self.limit, listings.clone());
                    listings
                }
                Err(e) => {
                    warn!(coin = %coin, error = %e, "Market listings unavailable");
                    return Lookup::degraded(
                        None,
                        format!("Error fetching market data from {}: {}", self.listings.name(), e),
                    );
                }
            },
        };

        Lookup::ok(find_listing(&listings, coin.as_str(), self.limit).cloned())
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feeds::MockMarketListings;

    fn numbered_listings(count: u32) -> Vec<MarketSnapshot> {
        (1..=count)
            .map(|rank| MarketSnapshot {
                name: format!("Coin {rank}"),
                symbol: format!("C{rank}"),
                price: None,
                market_cap: None,
                rank,
                change_24h: None,
            })
            .collect()
    }

    #[test]
    fn test_find_listing_matches_name_or_symbol() {
        let listings = numbered_listings(10);

        assert_eq!(find_listing(&listings, "coin 3", 50).unwrap().rank, 3);
        assert_eq!(find_listing(&listings, "c7", 50).unwrap().rank, 7);
        assert_eq!(find_listing(&listings, "C7", 50).unwrap().rank, 7);
        assert!(find_listing(&listings, "", 50).is_none());
        assert!(find_listing(&listings, "c11", 50).is_none());
    }

    #[test]
    fn test_find_listing_respects_page_size() {
        let listings = numbered_listings(60);

        assert_eq!(find_listing(&listings, "c50", 50).unwrap().rank, 50);
        assert!(find_listing(&listings, "c51", 50).is_none());
        assert!(find_listing(&listings, "c55", 50).is_none());
    }

    #[tokio::test]
    async fn test_fetch_market_case_insensitive() {
        let feed = Arc::new(MockMarketListings::new());
        let market = MarketLookup::new(feed.clone(), 50, Duration::from_secs(300));

        let by_name = market.fetch_market(&CoinId::new("ethereum")).await.value.unwrap();
        let by_symbol = market.fetch_market(&CoinId::new("ETH")).await.value.unwrap();

        assert_eq!(by_name, by_symbol);
        assert_eq!(by_name.rank, 2);
        // second lookup served from the cached page
        assert_eq!(feed.calls(), 1);
    }

    #[tokio::test]
    async fn test_coin_beyond_page_is_never_returned() {
        let feed = Arc::new(MockMarketListings::from_listings(numbered_listings(60)));
        let market = MarketLookup::new(feed, 50, Duration::from_secs(300));

        let result = market.fetch_market(&CoinId::new("c51")).await;
        assert!(result.value.is_none());
        assert!(result.warning.is_none());
    }

    #[tokio::test]
    async fn test_feed_failure_degrades_with_warning() {
        let feed = Arc::new(MockMarketListings::failing());
        let market = MarketLookup::new(feed.clone(), 50, Duration::from_secs(300));

        let result = market.fetch_market(&CoinId::new("bitcoin")).await;
        assert!(result.value.is_none());
        assert!(result.warning.unwrap().contains("COINMARKETCAP_API_KEY"));

        market.fetch_market(&CoinId::new("bitcoin")).await;
        assert_eq!(feed.calls(), 2);
    }
}
