//! Market Data Feeds
//!
//! News and market-ranking sources. Like [`crate::exchange::ExchangeClient`],
//! each feed is a trait so the assistant can run against mocks.

mod coinmarketcap;
mod cryptopanic;
mod mock;

pub use coinmarketcap::CoinMarketCapClient;
pub use cryptopanic::CryptoPanicClient;
pub use mock::{MockMarketListings, MockNewsFeed};

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{MarketSnapshot, NewsItem};

/// Source of recent headlines
#[async_trait]
pub trait NewsFeed: Send + Sync {
    /// "Rising" posts tagged with `ticker`, newest first
    async fn rising_posts(&self, ticker: &str) -> Result<Vec<NewsItem>>;

    fn name(&self) -> &str;
}

/// Source of coins ranked by market capitalization
#[async_trait]
pub trait MarketListings: Send + Sync {
    /// The top `limit` coins, ordered by rank
    async fn latest_listings(&self, limit: usize) -> Result<Vec<MarketSnapshot>>;

    fn name(&self) -> &str;
}
