//! Domain Models
//!
//! Data types for one assistant interaction. Prices use `rust_decimal`,
//! never f64, so the BTC conversion hop stays exact.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Canonical coin identifier derived from a free-text query.
///
/// Always lower-case and trimmed. An empty identifier means "not found".
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoinId(String);

impl CoinId {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Upper-cased form, used as a ticker of last resort
    pub fn to_ticker(&self) -> String {
        self.0.to_uppercase()
    }

    /// Capitalized form for headings ("bitcoin" -> "Bitcoin")
    pub fn display_name(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl std::fmt::Display for CoinId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A news headline about a coin
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,

    /// Publisher label (e.g. "CoinDesk")
    pub source: String,

    pub published_at: DateTime<Utc>,

    pub url: String,
}

/// Point-in-time market ranking data for one coin
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Full name (e.g., "Bitcoin")
    pub name: String,

    /// Ticker symbol (e.g., "BTC")
    pub symbol: String,

    /// Price in USD
    pub price: Option<Decimal>,

    /// Market capitalization in USD
    pub market_cap: Option<Decimal>,

    /// Rank by market cap (1 = largest)
    pub rank: u32,

    /// 24-hour price change percentage
    pub change_24h: Option<Decimal>,
}

impl MarketSnapshot {
    /// Case-insensitive match on either full name or ticker
    pub fn matches(&self, coin: &str) -> bool {
        self.name.eq_ignore_ascii_case(coin) || self.symbol.eq_ignore_ascii_case(coin)
    }
}

/// How a price was obtained
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PriceRoute {
    /// Quoted directly against USDT
    Direct { pair: String },

    /// Quoted against BTC, then converted through BTCUSDT
    ViaBtc {
        pair: String,
        price_in_btc: Decimal,
        btc_usdt: Decimal,
    },
}

/// A USD-equivalent price for a symbol
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub symbol: String,

    /// Price in USDT (USD-equivalent); never negative
    pub price_usd: Decimal,

    pub route: PriceRoute,

    /// Exchange that quoted the price
    pub source: String,

    pub fetched_at: DateTime<Utc>,
}

impl PriceQuote {
    pub fn direct(symbol: impl Into<String>, pair: impl Into<String>, price_usd: Decimal, source: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            price_usd,
            route: PriceRoute::Direct { pair: pair.into() },
            source: source.into(),
            fetched_at: Utc::now(),
        }
    }

    /// `price_usd = price_in_btc * btc_usdt`
    pub fn via_btc(
        symbol: impl Into<String>,
        pair: impl Into<String>,
        price_in_btc: Decimal,
        btc_usdt: Decimal,
        source: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            price_usd: price_in_btc * btc_usdt,
            route: PriceRoute::ViaBtc {
                pair: pair.into(),
                price_in_btc,
                btc_usdt,
            },
            source: source.into(),
            fetched_at: Utc::now(),
        }
    }

    pub fn is_converted(&self) -> bool {
        matches!(self.route, PriceRoute::ViaBtc { .. })
    }
}
