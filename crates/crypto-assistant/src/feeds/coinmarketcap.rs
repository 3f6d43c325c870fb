//! CoinMarketCap listings client

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, RequestBuilder};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, warn};

use super::MarketListings;
use crate::config::AssistantConfig;
use crate::error::{AssistantError, Result};
use crate::model::MarketSnapshot;

const API_KEY_HEADER: &str = "X-CMC_PRO_API_KEY";
const CONVERT: &str = "USD";

#[derive(Debug, Deserialize)]
struct ListingsResponse {
    data: Vec<Listing>,
}

#[derive(Debug, Deserialize)]
struct Listing {
    name: String,
    symbol: String,
    cmc_rank: u32,
    #[serde(default)]
    quote: HashMap<String, UsdQuote>,
}

#[derive(Debug, Default, Deserialize)]
struct UsdQuote {
    price: Option<Decimal>,
    market_cap: Option<Decimal>,
    percent_change_24h: Option<Decimal>,
}

impl From<Listing> for MarketSnapshot {
    fn from(mut listing: Listing) -> Self {
        let usd = listing.quote.remove(CONVERT).unwrap_or_default();
        Self {
            name: listing.name,
            symbol: listing.symbol,
            price: usd.price,
            market_cap: usd.market_cap,
            rank: listing.cmc_rank,
            change_24h: usd.percent_change_24h,
        }
    }
}

/// HTTP client for CoinMarketCap listings
pub struct CoinMarketCapClient {
    http: HttpClient,
    base_url: String,
    api_key: Option<String>,
}

impl CoinMarketCapClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>, timeout: Duration) -> Self {
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
            api_key,
        }
    }

    pub fn from_config(config: &AssistantConfig) -> Self {
        Self::new(
            config.coinmarketcap_api_url.clone(),
            config.coinmarketcap_api_key.clone(),
            config.http_timeout(),
        )
    }

    fn listings_request(&self, api_key: &str, limit: usize) -> RequestBuilder {
        self.http
            .get(format!("{}/cryptocurrency/listings/latest", self.base_url))
            .header(reqwest::header::ACCEPT, "application/json")
            .header(API_KEY_HEADER, api_key)
            .query(&[
                ("start", "1"),
                ("limit", limit.to_string().as_str()),
                ("convert", CONVERT),
            ])
    }
}

#[async_trait]
impl MarketListings for CoinMarketCapClient {
    async fn latest_listings(&self, limit: usize) -> Result<Vec<MarketSnapshot>> {
        let api_key = self.api_key
            .as_deref()
            .ok_or(AssistantError::MissingApiKey("COINMARKETCAP_API_KEY"))?;

        debug!(limit, "Fetching CoinMarketCap listings");

        let response = self.listings_request(api_key, limit).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AssistantError::UpstreamStatus {
                service: "CoinMarketCap",
                status: status.as_u16(),
            });
        }

        let listings: ListingsResponse = response.json().await?;
        Ok(listings.data.into_iter().map(MarketSnapshot::from).collect())
    }

    fn name(&self) -> &str {
        "CoinMarketCap"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_listing_projection() {
        let json = r#"{
            "status": {"error_code": 0},
            "data": [{
                "id": 1,
                "name": "Bitcoin",
                "symbol": "BTC",
                "cmc_rank": 1,
                "quote": {"USD": {
                    "price": 97500.25,
                    "market_cap": 1930000000000,
                    "percent_change_24h": -1.5
                }}
            }]
        }"#;

        let listings: ListingsResponse = serde_json::from_str(json).unwrap();
        let snapshot = MarketSnapshot::from(listings.data.into_iter().next().unwrap());

        assert_eq!(snapshot.name, "Bitcoin");
        assert_eq!(snapshot.symbol, "BTC");
        assert_eq!(snapshot.rank, 1);
        assert_eq!(snapshot.price, Some(dec!(97500.25)));
        assert_eq!(snapshot.market_cap, Some(dec!(1930000000000)));
        assert_eq!(snapshot.change_24h, Some(dec!(-1.5)));
    }

    #[test]
    fn test_listing_without_quote_or_nulls() {
        let json = r#"{"data": [
            {"name": "Foo", "symbol": "FOO", "cmc_rank": 7},
            {"name": "Bar", "symbol": "BAR", "cmc_rank": 8, "quote": {"USD": {"price": null}}}
        ]}"#;

        let listings: ListingsResponse = serde_json::from_str(json).unwrap();
        let snapshots: Vec<MarketSnapshot> = listings.data.into_iter().map(MarketSnapshot::from).collect();

        assert!(snapshots.iter().all(|s| s.price.is_none() && s.market_cap.is_none()));
    }

    #[test]
    fn test_listings_request_shape() {
        let client = CoinMarketCapClient::new("https://pro-api.coinmarketcap.com/v1", None, Duration::from_secs(5));
        let request = client.listings_request("cmc-key", 50).build().unwrap();

        assert_eq!(request.url().path(), "/v1/cryptocurrency/listings/latest");
        let query: Vec<(String, String)> = request.url().query_pairs().into_owned().collect();
        assert_eq!(
            query,
            vec![
                ("start".to_string(), "1".to_string()),
                ("limit".to_string(), "50".to_string()),
                ("convert".to_string(), "USD".to_string()),
            ]
        );
        assert_eq!(request.headers()["X-CMC_PRO_API_KEY"], "cmc-key");
        assert_eq!(request.headers()[reqwest::header::ACCEPT], "application/json");
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_request() {
        let client = CoinMarketCapClient::new("http://127.0.0.1:9", None, Duration::from_secs(1));
        let err = client.latest_listings(50).await.unwrap_err();
        assert!(matches!(err, AssistantError::MissingApiKey("COINMARKETCAP_API_KEY")));
    }
}
