//! Exchange Integration
//!
//! Abstractions and implementations for spot-price sources.

mod binance;
mod mock;

pub use binance::BinanceClient;
pub use mock::MockExchangeClient;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::Result;

/// Quote asset used for USD-equivalent prices
pub const USD_QUOTE: &str = "USDT";

/// Intermediate quote asset for the conversion hop
pub const BTC_QUOTE: &str = "BTC";

/// Pair used to convert BTC-denominated prices
pub const BTC_USDT_PAIR: &str = "BTCUSDT";

/// Exchange client trait (Strategy pattern)
///
/// Implement this for each exchange: Binance, Coinbase, Kraken, etc.
#[async_trait]
pub trait ExchangeClient: Send + Sync {
    /// Last traded price for a trading pair such as `ETHUSDT`
    async fn ticker_price(&self, pair: &str) -> Result<Decimal>;

    /// Exchange name
    fn name(&self) -> &str;
}

/// Build a trading pair symbol (`eth`, `USDT` -> `ETHUSDT`)
pub fn pair(base: &str, quote: &str) -> String {
    format!("{}{}", base.trim().to_uppercase(), quote)
}
