//! Data Aggregator
//!
//! One sequential pass per question:
//!
//! ```text
//! query ─▶ resolve ─▶ market ─▶ symbol ─▶ news ─┬─▶ price ─▶ summarize ─▶ report
//!                                              └─▶ UnsupportedCoin (no market, no news)
//! ```

use std::sync::Arc;
use std::time::Duration;

use agent_core::{GenerationOptions, LlmProvider};
use chrono::Utc;
use tracing::{info, info_span, Instrument};

use crate::config::AssistantConfig;
use crate::error::{AssistantError, Result};
use crate::exchange::{BinanceClient, ExchangeClient};
use crate::feeds::{CoinMarketCapClient, CryptoPanicClient, MarketListings, NewsFeed};
use crate::report::AssistantReport;
use crate::resolver::resolve;
use crate::svckit::{resolve_symbol, MarketLookup, NewsLookup, PriceLookup, Summarizer};

/// Answers questions about a coin from market, news and price sources
pub struct CryptoAssistant {
    market: MarketLookup,
    news: NewsLookup,
    prices: PriceLookup,
    summarizer: Summarizer,
}

impl CryptoAssistant {
    pub fn new(
        exchange: Arc<dyn ExchangeClient>,
        news_feed: Arc<dyn NewsFeed>,
        listings: Arc<dyn MarketListings>,
        provider: Arc<dyn LlmProvider>,
        generation: GenerationOptions,
        config: &AssistantConfig,
    ) -> Self {
        Self {
            market: MarketLookup::new(
                listings,
                config.listing_limit,
                Duration::from_secs(config.market_cache_ttl_secs),
            ),
            news: NewsLookup::new(
                news_feed,
                config.news_limit,
                Duration::from_secs(config.news_cache_ttl_secs),
            ),
            prices: PriceLookup::new(exchange, Duration::from_secs(config.price_cache_ttl_secs)),
            summarizer: Summarizer::new(provider, generation),
        }
    }

    /// Wire the live Binance, CryptoPanic and CoinMarketCap clients
    pub fn from_config(
        config: &AssistantConfig,
        provider: Arc<dyn LlmProvider>,
        generation: GenerationOptions,
    ) -> Self {
        Self::new(
            Arc::new(BinanceClient::from_config(config)),
            Arc::new(CryptoPanicClient::from_config(config)),
            Arc::new(CoinMarketCapClient::from_config(config)),
            provider,
            generation,
            config,
        )
    }

    /// Answer a free-text question.
    ///
    /// # Errors
    ///
    /// [`AssistantError::UnsupportedCoin`] when no coin could be resolved, or
    /// when neither market data nor news exist for it; the error keeps the
    /// warnings of any lookup that failed. Every other failure degrades into a
    /// warning on the report.
    pub async fn ask(&self, query: &str) -> Result<AssistantReport> {
        let coin = resolve(query);
        let span = info_span!("ask", coin = %coin);

        async move {
            if coin.is_empty() {
                return Err(AssistantError::UnsupportedCoin { coin: String::new(), warnings: Vec::new() });
            }

            let mut warnings = Vec::new();

            let market = self.market.fetch_market(&coin).await.collect_into(&mut warnings);
            let symbol = resolve_symbol(&coin, market.as_ref());
            let news = self.news.fetch_news(&symbol.symbol).await.collect_into(&mut warnings);

            if market.is_none() && news.is_empty() {
                info!(symbol = %symbol.symbol, warnings = warnings.len(), "No market data or news, giving up");
                return Err(AssistantError::UnsupportedCoin {
                    coin: coin.to_string(),
                    warnings,
                });
            }

            let price = self.prices.fetch_price(&symbol.symbol).await.collect_into(&mut warnings);

            let summary = self.summarizer
                .summarize(&coin, &news, price.as_ref(), market.as_ref())
                .await
                .collect_into(&mut warnings);

            info!(
                symbol = %symbol.symbol,
                has_market = market.is_some(),
                has_price = price.is_some(),
                news = news.len(),
                warnings = warnings.len(),
                "Report ready"
            );

            Ok(AssistantReport {
                title: format!("Results for {}", coin.display_name()),
                coin,
                symbol,
                market,
                price,
                news,
                summary,
                warnings,
                generated_at: Utc::now(),
            })
        }
        .instrument(span)
        .await
    }

    /// Drop every cached lookup result
    pub fn invalidate_caches(&self) {
        self.market.clear_cache();
        self.news.clear_cache();
        self.prices.clear_cache();
    }
}
