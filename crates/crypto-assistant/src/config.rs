//! Assistant Configuration
//!
//! Endpoints, API keys, timeouts and cache lifetimes, read from the
//! environment. A missing API key is not an error here: the matching lookup
//! fails at call time and degrades to a warning.

use std::time::Duration;

pub const DEFAULT_BINANCE_API_URL: &str = "https://api.binance.com/api/v3";
pub const DEFAULT_COINMARKETCAP_API_URL: &str = "https://pro-api.coinmarketcap.com/v1";
pub const DEFAULT_CRYPTOPANIC_API_URL: &str = "https://cryptopanic.com/api/v1";

/// Configuration for the data sources and caches
#[derive(Clone, Debug)]
pub struct AssistantConfig {
    pub binance_api_url: String,
    pub coinmarketcap_api_url: String,
    pub cryptopanic_api_url: String,

    pub coinmarketcap_api_key: Option<String>,
    pub cryptopanic_api_key: Option<String>,

    /// Timeout for each exchange price call
    pub price_timeout_secs: u64,

    /// Timeout for news and listings calls
    pub http_timeout_secs: u64,

    pub news_cache_ttl_secs: u64,
    pub price_cache_ttl_secs: u64,
    pub market_cache_ttl_secs: u64,

    /// Listing page size; coins ranked below this are never found
    pub listing_limit: usize,

    /// Maximum headlines kept per query
    pub news_limit: usize,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            binance_api_url: DEFAULT_BINANCE_API_URL.into(),
            coinmarketcap_api_url: DEFAULT_COINMARKETCAP_API_URL.into(),
            cryptopanic_api_url: DEFAULT_CRYPTOPANIC_API_URL.into(),
            coinmarketcap_api_key: None,
            cryptopanic_api_key: None,
            price_timeout_secs: 5,
            http_timeout_secs: 10,
            news_cache_ttl_secs: 300,
            price_cache_ttl_secs: 60,
            market_cache_ttl_secs: 300,
            listing_limit: 50,
            news_limit: 5,
        }
    }
}

impl AssistantConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (environment, test map, ...)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let string = |key: &str, default: String| {
            lookup(key)
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
        };
        let secret = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let number = |key: &str, default: u64| {
            lookup(key)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(default)
        };

        Self {
            binance_api_url: string("BINANCE_API_URL", defaults.binance_api_url),
            coinmarketcap_api_url: string("COINMARKETCAP_API_URL", defaults.coinmarketcap_api_url),
            cryptopanic_api_url: string("CRYPTOPANIC_API_URL", defaults.cryptopanic_api_url),
            coinmarketcap_api_key: secret("COINMARKETCAP_API_KEY"),
            cryptopanic_api_key: secret("CRYPTOPANIC_API_KEY"),
            price_timeout_secs: number("PRICE_TIMEOUT_SECS", defaults.price_timeout_secs),
            http_timeout_secs: number("HTTP_TIMEOUT_SECS", defaults.http_timeout_secs),
            news_cache_ttl_secs: number("NEWS_CACHE_TTL_SECS", defaults.news_cache_ttl_secs),
            price_cache_ttl_secs: number("PRICE_CACHE_TTL_SECS", defaults.price_cache_ttl_secs),
            market_cache_ttl_secs: number("MARKET_CACHE_TTL_SECS", defaults.market_cache_ttl_secs),
            ..defaults
        }
    }

    pub fn price_timeout(&self) -> Duration {
        Duration::from_secs(self.price_timeout_secs)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AssistantConfig::default();
        assert_eq!(config.listing_limit, 50);
        assert_eq!(config.news_limit, 5);
        assert_eq!(config.price_cache_ttl_secs, 60);
        assert_eq!(config.news_cache_ttl_secs, 300);
        assert!(config.coinmarketcap_api_key.is_none());
    }

    #[test]
    fn test_from_lookup_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("BINANCE_API_URL", "http://localhost:9000/api/v3/"),
            ("COINMARKETCAP_API_KEY", " cmc-key "),
            ("CRYPTOPANIC_API_KEY", ""),
            ("PRICE_TIMEOUT_SECS", "7"),
            ("HTTP_TIMEOUT_SECS", "not-a-number"),
        ]);

        let config = AssistantConfig::from_lookup(|k| vars.get(k).map(|v| (*v).to_string()));

        assert_eq!(config.binance_api_url, "http://localhost:9000/api/v3");
        assert_eq!(config.coinmarketcap_api_key.as_deref(), Some("cmc-key"));
        assert!(config.cryptopanic_api_key.is_none());
        assert_eq!(config.price_timeout(), Duration::from_secs(7));
        assert_eq!(config.http_timeout_secs, 10);
        assert_eq!(config.coinmarketcap_api_url, DEFAULT_COINMARKETCAP_API_URL);
    }
}
