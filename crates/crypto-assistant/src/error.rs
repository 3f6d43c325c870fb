//! Error Types for the Crypto Assistant

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AssistantError>;

#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("Exchange error: {0}")]
    Exchange(String),

    #[error("Price unavailable for {0}")]
    PriceUnavailable(String),

    #[error("Invalid price for {pair}: {value}")]
    InvalidPrice {
        pair: String,
        value: rust_decimal::Decimal,
    },

    #[error("Upstream {service} returned status {status}")]
    UpstreamStatus {
        service: &'static str,
        status: u16,
    },

    #[error("Missing API key: {0} is not set")]
    MissingApiKey(&'static str),

    /// No coin resolved, or nothing known about it. `warnings` lists the
    /// lookups that failed on the way.
    #[error("Coin not supported: {coin}")]
    UnsupportedCoin {
        coin: String,
        warnings: Vec<String>,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl AssistantError {
    /// Message suitable for showing to the person who asked
    pub fn user_message(&self) -> String {
        match self {
            AssistantError::UnsupportedCoin { coin, .. } if coin.is_empty() => {
                "I couldn't tell which coin you mean. Try something like 'Tell me about Bitcoin'.".into()
            }
            AssistantError::UnsupportedCoin { coin, warnings } if warnings.is_empty() => {
                format!("Sorry, I couldn't find market data or news for '{}'.", coin)
            }
            AssistantError::UnsupportedCoin { coin, .. } => {
                format!("Couldn't look up '{}': some data sources failed.", coin)
            }
            AssistantError::MissingApiKey(var) => {
                format!("Data source not configured ({} missing).", var)
            }
            AssistantError::Network(e) if e.is_timeout() => "A data source timed out.".into(),
            AssistantError::Network(_) => "A data source could not be reached.".into(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_coin_messages() {
        let empty = AssistantError::UnsupportedCoin { coin: String::new(), warnings: Vec::new() };
        assert!(empty.user_message().contains("couldn't tell"));

        let named = AssistantError::UnsupportedCoin { coin: "foocoin".into(), warnings: Vec::new() };
        assert!(named.user_message().contains("couldn't find"));
        assert!(named.user_message().contains("foocoin"));

        let outage = AssistantError::UnsupportedCoin {
            coin: "bitcoin".into(),
            warnings: vec!["Error fetching news from CryptoPanic: boom".into()],
        };
        assert!(outage.user_message().contains("sources failed"));
    }

    #[test]
    fn test_missing_key_names_variable() {
        let err = AssistantError::MissingApiKey("COINMARKETCAP_API_KEY");
        assert!(err.to_string().contains("COINMARKETCAP_API_KEY"));
    }
}
