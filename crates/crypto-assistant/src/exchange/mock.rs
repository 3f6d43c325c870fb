//! Mock Exchange Client
//!
//! For testing and demo purposes. Quotes a static table of pairs and records
//! every pair it was asked for.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::ExchangeClient;
use crate::error::{AssistantError, Result};

/// Mock exchange client with static prices
pub struct MockExchangeClient {
    pairs: HashMap<String, Decimal>,
    requests: Mutex<Vec<String>>,
}

impl Default for MockExchangeClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockExchangeClient {
    /// Client seeded with realistic USDT prices for the majors
    pub fn new() -> Self {
        let pairs = [
            ("BTCUSDT", dec!(97500)),
            ("ETHUSDT", dec!(3450)),
            ("SOLUSDT", dec!(195)),
            ("ADAUSDT", dec!(0.95)),
            ("DOTUSDT", dec!(7.20)),
            ("LINKUSDT", dec!(24.50)),
            ("AVAXUSDT", dec!(42.00)),
            ("XRPUSDT", dec!(2.35)),
            ("DOGEUSDT", dec!(0.38)),
            ("LTCUSDT", dec!(105)),
            ("ETHBTC", dec!(0.0354)),
        ];

        Self::empty().with_pairs(pairs)
    }

    /// Client that knows no pairs at all
    pub fn empty() -> Self {
        Self {
            pairs: HashMap::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_pair(mut self, pair: &str, price: Decimal) -> Self {
        self.pairs.insert(pair.to_uppercase(), price);
        self
    }

    #[must_use]
    pub fn with_pairs<'a>(mut self, pairs: impl IntoIterator<Item = (&'a str, Decimal)>) -> Self {
        for (pair, price) in pairs {
            self.pairs.insert(pair.to_uppercase(), price);
        }
        self
    }

    #[must_use]
    pub fn without_pair(mut self, pair: &str) -> Self {
        self.pairs.remove(&pair.to_uppercase());
        self
    }

    /// Pairs requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ExchangeClient for MockExchangeClient {
    async fn ticker_price(&self, pair: &str) -> Result<Decimal> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(pair.to_string());
        }

        self.pairs
            .get(&pair.to_uppercase())
            .copied()
            .ok_or_else(|| AssistantError::Exchange(format!("Invalid symbol: {}", pair)))
    }

    fn name(&self) -> &str {
        "MockExchange"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_exchange() {
        let exchange = MockExchangeClient::new();

        let btc = exchange.ticker_price("BTCUSDT").await.unwrap();
        assert!(btc > Decimal::ZERO);
        assert_eq!(exchange.requests(), vec!["BTCUSDT".to_string()]);
    }

    #[tokio::test]
    async fn test_unknown_pair() {
        let exchange = MockExchangeClient::new().without_pair("ETHUSDT");
        assert!(exchange.ticker_price("NOTREALUSDT").await.is_err());
        assert!(exchange.ticker_price("ETHUSDT").await.is_err());
    }
}
