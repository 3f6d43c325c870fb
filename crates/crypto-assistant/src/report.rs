//! Assistant Report
//!
//! Everything gathered for one question, shaped for a two-pane view:
//! narrative on one side, metrics and news on the other.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::display::{format_percent, format_usd, format_usd_whole, or_na};
use crate::model::{CoinId, MarketSnapshot, NewsItem, PriceQuote};
use crate::svckit::ResolvedSymbol;

/// One labelled value in the metrics panel
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Metric {
    pub label: &'static str,
    pub value: String,
}

impl Metric {
    fn new(label: &'static str, value: String) -> Self {
        Self { label, value }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct AssistantReport {
    pub coin: CoinId,

    /// Heading text ("Results for Bitcoin")
    pub title: String,

    pub symbol: ResolvedSymbol,

    pub market: Option<MarketSnapshot>,

    pub price: Option<PriceQuote>,

    pub news: Vec<NewsItem>,

    /// Narrative from the language model; empty when it failed
    pub summary: String,

    /// Problems the user should see (degraded lookups)
    pub warnings: Vec<String>,

    pub generated_at: DateTime<Utc>,
}

impl AssistantReport {
    pub fn has_summary(&self) -> bool {
        !self.summary.trim().is_empty()
    }

    /// Metrics panel rows. Empty when no market snapshot was found, except
    /// for the exchange price which is shown on its own.
    pub fn metrics(&self) -> Vec<Metric> {
        let mut rows = Vec::new();

        if let Some(market) = &self.market {
            rows.push(Metric::new("Price", or_na(market.price, format_usd)));
            rows.push(Metric::new("Market Cap", or_na(market.market_cap, format_usd_whole)));
            rows.push(Metric::new("Rank", format!("#{}", market.rank)));
            rows.push(Metric::new("24h Change", or_na(market.change_24h, format_percent)));
        }

        if let Some(quote) = &self.price {
            rows.push(Metric::new("Exchange Price", format!("{} ({})", format_usd(quote.price_usd), quote.source)));
        }

        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svckit::SymbolSource;
    use rust_decimal_macros::dec;

    fn report(market: Option<MarketSnapshot>, price: Option<PriceQuote>) -> AssistantReport {
        AssistantReport {
            coin: CoinId::new("bitcoin"),
            title: "Results for Bitcoin".into(),
            symbol: ResolvedSymbol { symbol: "BTC".into(), source: SymbolSource::Snapshot },
            market,
            price,
            news: Vec::new(),
            summary: "  ".into(),
            warnings: Vec::new(),
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_metrics_from_snapshot() {
        let market = MarketSnapshot {
            name: "Bitcoin".into(),
            symbol: "BTC".into(),
            price: Some(dec!(97500)),
            market_cap: Some(dec!(1930000000000)),
            rank: 1,
            change_24h: Some(dec!(2.5)),
        };

        let metrics = report(Some(market), None).metrics();
        let values: Vec<(&str, &str)> = metrics.iter().map(|m| (m.label, m.value.as_str())).collect();

        assert_eq!(
            values,
            vec![
                ("Price", "$97,500.00"),
                ("Market Cap", "$1,930,000,000,000"),
                ("Rank", "#1"),
                ("24h Change", "2.50%"),
            ]
        );
    }

    #[test]
    fn test_metrics_without_snapshot() {
        let quote = PriceQuote::direct("BTC", "BTCUSDT", dec!(97000), "Binance");
        let with_price = report(None, Some(quote));

        assert_eq!(with_price.metrics().len(), 1);
        assert!(report(None, None).metrics().is_empty());
        assert!(!with_price.has_summary());
    }
}
