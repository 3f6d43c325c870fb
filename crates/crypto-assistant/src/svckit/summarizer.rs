//! Prompt Assembly & Summarization
//!
//! Formats everything fetched for a coin into a fixed template and asks the
//! language model for a short narrative. A failed call yields an empty
//! narrative; it never blocks the data already fetched.

use std::fmt::Write as _;
use std::sync::Arc;

use agent_core::{GenerationOptions, LlmProvider};
use tracing::{debug, warn};

use super::Lookup;
use crate::display::{format_percent, format_usd, format_usd_whole, or_na, NOT_AVAILABLE};
use crate::model::{CoinId, MarketSnapshot, NewsItem, PriceQuote, PriceRoute};

pub const NO_NEWS: &str = "No recent news";

const INSTRUCTIONS: &str = "Please summarize the information in a clear, professional manner, highlighting:
- Current price and price change
- Market cap and ranking
- Key recent news developments
- Any notable trends or insights

Keep the response under 200 words.";

/// Render the summarization prompt
pub fn build_prompt(
    coin: &CoinId,
    news: &[NewsItem],
    quote: Option<&PriceQuote>,
    snapshot: Option<&MarketSnapshot>,
) -> String {
    let mut prompt = String::from(
        "You are a helpful AI Crypto Assistant. Provide a concise and informative response based on the following data:\n\n",
    );

    let _ = writeln!(prompt, "User asked about: {}\n", coin);

    prompt.push_str("Latest News:\n");
    if news.is_empty() {
        let _ = writeln!(prompt, "{}", NO_NEWS);
    } else {
        for item in news {
            let _ = writeln!(
                prompt,
                "- {} ({}, {})",
                item.title,
                item.source,
                item.published_at.format("%Y-%m-%d %H:%M UTC"),
            );
        }
    }

    prompt.push_str("\nPrice Data:\n");
    match quote {
        Some(quote) => {
            let route = match &quote.route {
                PriceRoute::Direct { pair } => format!("pair {}", pair),
                PriceRoute::ViaBtc { pair, .. } => format!("pair {} converted via BTCUSDT", pair),
            };
            let _ = writeln!(
                prompt,
                "Price: {} (source: {}, {}, at {})",
                format_usd(quote.price_usd),
                quote.source,
                route,
                quote.fetched_at.to_rfc3339(),
            );
        }
        None => {
            let _ = writeln!(prompt, "Price: {}", NOT_AVAILABLE);
        }
    }

    prompt.push_str("\nMarket Data:\n");
    match snapshot {
        Some(s) => {
            let _ = writeln!(prompt, "Name: {}", s.name);
            let _ = writeln!(prompt, "Symbol: {}", s.symbol);
            let _ = writeln!(prompt, "Price: {}", or_na(s.price, format_usd));
            let _ = writeln!(prompt, "Market Cap: {}", or_na(s.market_cap, format_usd_whole));
            let _ = writeln!(prompt, "Rank: #{}", s.rank);
            let _ = writeln!(prompt, "24h Change: {}", or_na(s.change_24h, format_percent));
        }
        None => {
            let _ = writeln!(prompt, "Market data: {}", NOT_AVAILABLE);
        }
    }

    prompt.push('\n');
    prompt.push_str(INSTRUCTIONS);
    prompt
}

/// Language-model backed narrative writer
pub struct Summarizer {
    provider: Arc<dyn LlmProvider>,
    options: GenerationOptions,
}

impl Summarizer {
    /// The temperature is clamped into the supported range.
    pub fn new(provider: Arc<dyn LlmProvider>, options: GenerationOptions) -> Self {
        let temperature = options.temperature;
        Self {
            provider,
            options: options.with_temperature(temperature),
        }
    }

    /// Narrative text, or an empty string plus a warning on any failure
    pub async fn summarize(
        &self,
        coin: &CoinId,
        news: &[NewsItem],
        quote: Option<&PriceQuote>,
        snapshot: Option<&MarketSnapshot>,
    ) -> Lookup<String> {
        let prompt = build_prompt(coin, news, quote, snapshot);
        debug!(coin = %coin, model = %self.options.model, "Requesting summary");

        match self.provider.generate(&prompt, &self.options).await {
            Ok(completion) => Lookup::ok(completion.content),
            Err(e) => {
                warn!(coin = %coin, provider = self.provider.name(), error = %e, "Summarization failed");
                Lookup::degraded(String::new(), format!("Error generating AI response: {}", e.user_message()))
            }
        }
    }
}
