//! Binance Spot Client
//!
//! Reads `GET /ticker/price?symbol=PAIR`. Binance encodes the price as a
//! decimal string, which deserializes straight into `Decimal`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, RequestBuilder};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, warn};

use super::ExchangeClient;
use crate::config::AssistantConfig;
use crate::error::{AssistantError, Result};

#[derive(Debug, Deserialize)]
struct TickerPrice {
    #[serde(with = "rust_decimal::serde::str")]
    price: Decimal,
}

/// HTTP client for Binance spot prices
pub struct BinanceClient {
    http: HttpClient,
    base_url: String,
}

impl BinanceClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &AssistantConfig) -> Self {
        Self::new(config.binance_api_url.clone(), config.price_timeout())
    }

    fn price_request(&self, pair: &str) -> RequestBuilder {
        self.http
            .get(format!("{}/ticker/price", self.base_url))
            .query(&[("symbol", pair)])
    }
}

#[async_trait]
impl ExchangeClient for BinanceClient {
    async fn ticker_price(&self, pair: &str) -> Result<Decimal> {
        debug!(pair, "Fetching Binance ticker price");

        let response = self.price_request(pair).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AssistantError::UpstreamStatus {
                service: "Binance",
                status: status.as_u16(),
            });
        }

        let ticker: TickerPrice = response.json().await?;
        Ok(ticker.price)
    }

    fn name(&self) -> &str {
        "Binance"
    }
}
