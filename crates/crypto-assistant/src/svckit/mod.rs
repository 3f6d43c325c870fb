//! Service Kit - Guarded Lookups
//!
//! Each service wraps one external source, caches successful answers, and
//! never fails: errors degrade to an empty value plus a user-visible warning.

mod market;
mod news;
mod price_lookup;
mod summarizer;
mod symbol;

pub use market::{find_listing, MarketLookup};
pub use news::NewsLookup;
pub use price_lookup::PriceLookup;
pub use summarizer::{build_prompt, Summarizer};
pub use symbol::{resolve_symbol, ticker_override, ResolvedSymbol, SymbolSource, TICKER_OVERRIDES};

/// Outcome of a guarded lookup
#[derive(Clone, Debug, PartialEq)]
pub struct Lookup<T> {
    pub value: T,

    /// Set when the lookup failed and `value` is a fallback
    pub warning: Option<String>,
}

impl<T> Lookup<T> {
    pub fn ok(value: T) -> Self {
        Self { value, warning: None }
    }

    pub fn degraded(value: T, warning: impl Into<String>) -> Self {
        Self {
            value,
            warning: Some(warning.into()),
        }
    }

    /// Move any warning into `warnings` and return the value
    pub fn collect_into(self, warnings: &mut Vec<String>) -> T {
        if let Some(warning) = self.warning {
            warnings.push(warning);
        }
        self.value
    }
}
