//! Price Lookup
//!
//! Fetches a USD-equivalent price through a two-step fallback chain:
//!
//! 1. `<SYMBOL>USDT`
//! 2. `<SYMBOL>BTC`, converted with `BTCUSDT`
//!
//! The first pair with a valid (strictly positive) price wins.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::Lookup;
use crate::cache::TtlCache;
use crate::error::{AssistantError, Result};
use crate::exchange::{pair, ExchangeClient, BTC_QUOTE, BTC_USDT_PAIR, USD_QUOTE};
use crate::model::PriceQuote;

/// Cached price lookup against one exchange
pub struct PriceLookup {
    exchange: Arc<dyn ExchangeClient>,
    cache: TtlCache<String, PriceQuote>,
}

impl PriceLookup {
    pub fn new(exchange: Arc<dyn ExchangeClient>, cache_ttl: Duration) -> Self {
        Self {
            exchange,
            cache: TtlCache::new(cache_ttl),
        }
    }

    /// Price for `symbol`, or `None` plus a warning when every pair failed
    pub async fn fetch_price(&self, symbol: &str) -> Lookup<Option<PriceQuote>> {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Lookup::degraded(None, "No ticker symbol to price");
        }

        if let Some(quote) = self.cache.get(&symbol) {
            return Lookup::ok(Some(quote));
        }

        match self.try_fetch(&symbol).await {
            Ok(quote) => {
                self.cache.insert(symbol, quote.clone());
                Lookup::ok(Some(quote))
            }
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "Price lookup exhausted");
                Lookup::degraded(
                    None,
                    format!("Error fetching price from {}: {}", self.exchange.name(), e),
                )
            }
        }
    }

    async fn try_fetch(&self, symbol: &str) -> Result<PriceQuote> {
        let direct_pair = pair(symbol, USD_QUOTE);
        match self.valid_price(&direct_pair).await {
            Ok(price) => {
                return Ok(PriceQuote::direct(symbol, direct_pair, price, self.exchange.name()));
            }
            Err(e) => {
                debug!(pair = %direct_pair, error = %e, "USDT pair failed, trying BTC pair");
            }
        }

        let btc_pair = pair(symbol, BTC_QUOTE);
        let converted = async {
            let price_in_btc = self.valid_price(&btc_pair).await?;
            let btc_usdt = self.valid_price(BTC_USDT_PAIR).await?;
            Ok::<_, AssistantError>((price_in_btc, btc_usdt))
        };

        match converted.await {
            Ok((price_in_btc, btc_usdt)) => Ok(PriceQuote::via_btc(
                symbol,
                btc_pair,
                price_in_btc,
                btc_usdt,
                self.exchange.name(),
            )),
            Err(e) => {
                debug!(pair = %btc_pair, error = %e, "BTC conversion failed");
                Err(AssistantError::PriceUnavailable(symbol.to_string()))
            }
        }
    }

    async fn valid_price(&self, pair: &str) -> Result<Decimal> {
        let price = self.exchange.ticker_price(pair).await?;
        if price <= Decimal::ZERO {
            return Err(AssistantError::InvalidPrice {
                pair: pair.to_string(),
                value: price,
            });
        }
        Ok(price)
    }

    pub fn invalidate(&self, symbol: &str) -> bool {
        self.cache.invalidate(&symbol.trim().to_uppercase())
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
