//! Trading Symbol Resolution
//!
//! Tickers cannot always be derived from names ("ripple" trades as XRP), so
//! the price symbol comes from, in order:
//!
//! 1. the market snapshot's symbol
//! 2. the override table, keyed by coin identifier
//! 3. the upper-cased identifier

use serde::{Deserialize, Serialize};

use crate::model::{CoinId, MarketSnapshot};

/// Known coin names and their exchange tickers
pub const TICKER_OVERRIDES: &[(&str, &str)] = &[
    ("bitcoin", "BTC"),
    ("ethereum", "ETH"),
    ("ether", "ETH"),
    ("solana", "SOL"),
    ("cardano", "ADA"),
    ("polkadot", "DOT"),
    ("chainlink", "LINK"),
    ("avalanche", "AVAX"),
    ("polygon", "MATIC"),
    ("cosmos", "ATOM"),
    ("ripple", "XRP"),
    ("dogecoin", "DOGE"),
    ("doge", "DOGE"),
    ("shiba", "SHIB"),
    ("uniswap", "UNI"),
    ("litecoin", "LTC"),
    ("tron", "TRX"),
    ("stellar", "XLM"),
    ("monero", "XMR"),
    ("toncoin", "TON"),
    ("binance", "BNB"),
];

/// Which tier produced the symbol
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolSource {
    Snapshot,
    Override,
    Identifier,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSymbol {
    pub symbol: String,
    pub source: SymbolSource,
}

pub fn ticker_override(coin: &CoinId) -> Option<&'static str> {
    TICKER_OVERRIDES
        .iter()
        .find(|(name, _)| *name == coin.as_str())
        .map(|(_, ticker)| *ticker)
}

/// Effective trading symbol for price lookup
pub fn resolve_symbol(coin: &CoinId, snapshot: Option<&MarketSnapshot>) -> ResolvedSymbol {
    if let Some(symbol) = snapshot
        .map(|s| s.symbol.trim())
        .filter(|s| !s.is_empty())
    {
        return ResolvedSymbol {
            symbol: symbol.to_uppercase(),
            source: SymbolSource::Snapshot,
        };
    }

    if let Some(ticker) = ticker_override(coin) {
        return ResolvedSymbol {
            symbol: ticker.to_string(),
            source: SymbolSource::Override,
        };
    }

    ResolvedSymbol {
        symbol: coin.to_ticker(),
        source: SymbolSource::Identifier,
    }
}
