//! Mock feeds for tests and offline demos

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use rust_decimal_macros::dec;

use super::{MarketListings, NewsFeed};
use crate::error::{AssistantError, Result};
use crate::model::{MarketSnapshot, NewsItem};

/// News feed serving canned headlines per ticker
#[derive(Default)]
pub struct MockNewsFeed {
    posts: HashMap<String, Vec<NewsItem>>,
    failing: bool,
    calls: AtomicUsize,
}

impl MockNewsFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed whose every call fails
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Add `count` generated headlines for `ticker`
    #[must_use]
    pub fn with_headlines(mut self, ticker: &str, count: usize) -> Self {
        let now = Utc::now();
        let items = (0..count)
            .map(|i| NewsItem {
                title: format!("{} headline #{}", ticker.to_uppercase(), i + 1),
                source: "MockWire".into(),
                published_at: now - Duration::minutes(i64::try_from(i).unwrap_or(i64::MAX)),
                url: format!("https://news.example/{}/{}", ticker.to_lowercase(), i + 1),
            })
            .collect();

        self.posts.insert(ticker.to_uppercase(), items);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NewsFeed for MockNewsFeed {
    async fn rising_posts(&self, ticker: &str) -> Result<Vec<NewsItem>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.failing {
            return Err(AssistantError::UpstreamStatus {
                service: "MockNews",
                status: 503,
            });
        }

        Ok(self.posts.get(&ticker.to_uppercase()).cloned().unwrap_or_default())
    }

    fn name(&self) -> &str {
        "MockNews"
    }
}

/// Listings feed serving a fixed ranking
pub struct MockMarketListings {
    listings: Vec<MarketSnapshot>,
    failing: bool,
    calls: AtomicUsize,
}

impl Default for MockMarketListings {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMarketListings {
    /// Listings seeded with the top coins
    pub fn new() -> Self {
        let listings = vec![
            snapshot("Bitcoin", "BTC", 1, dec!(97500), dec!(1930000000000), dec!(2.5)),
            snapshot("Ethereum", "ETH", 2, dec!(3450), dec!(415000000000), dec!(1.8)),
            snapshot("XRP", "XRP", 3, dec!(2.35), dec!(134000000000), dec!(0.9)),
            snapshot("Solana", "SOL", 5, dec!(195), dec!(93000000000), dec!(4.2)),
            snapshot("Dogecoin", "DOGE", 7, dec!(0.38), dec!(56000000000), dec!(12.0)),
            snapshot("Cardano", "ADA", 9, dec!(0.95), dec!(33000000000), dec!(-1.2)),
        ];

        Self::from_listings(listings)
    }

    pub fn from_listings(listings: Vec<MarketSnapshot>) -> Self {
        Self {
            listings,
            failing: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Listings whose every call fails
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::from_listings(Vec::new())
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketListings for MockMarketListings {
    async fn latest_listings(&self, limit: usize) -> Result<Vec<MarketSnapshot>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.failing {
            return Err(AssistantError::MissingApiKey("COINMARKETCAP_API_KEY"));
        }

        // Like the real endpoint, the mock honours the page size.
        Ok(self.listings.iter().take(limit).cloned().collect())
    }

    fn name(&self) -> &str {
        "MockListings"
    }
}

fn snapshot(
    name: &str,
    symbol: &str,
    rank: u32,
    price: rust_decimal::Decimal,
    market_cap: rust_decimal::Decimal,
    change_24h: rust_decimal::Decimal,
) -> MarketSnapshot {
    MarketSnapshot {
        name: name.into(),
        symbol: symbol.into(),
        price: Some(price),
        market_cap: Some(market_cap),
        rank,
        change_24h: Some(change_24h),
    }
}
