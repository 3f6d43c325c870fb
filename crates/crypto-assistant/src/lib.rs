//! # crypto-assistant
//!
//! Answers natural-language questions about a cryptocurrency by combining
//! exchange prices, market rankings and headlines, then asking a language
//! model to summarize them.
//!
//! ## Flow
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  "Tell me about Bitcoin"                                     │
//! ├──────────────────────────────────────────────────────────────┤
//! │  resolver      → bitcoin                                     │
//! │  market        → CoinMarketCap top 50 → Bitcoin, BTC, #1     │
//! │  symbol        → BTC (snapshot > override table > id)        │
//! │  news          → CryptoPanic rising posts (≤ 5)              │
//! │  price         → BTCUSDT, else BTC pair × BTCUSDT            │
//! │  summarizer    → Ollama narrative                            │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every lookup degrades to "no value" plus a warning. The only hard error
//! is an unsupported coin.

pub mod assistant;
pub mod cache;
pub mod config;
pub mod display;
pub mod error;
pub mod exchange;
pub mod feeds;
pub mod model;
pub mod report;
pub mod resolver;
pub mod svckit;

pub use assistant::CryptoAssistant;
pub use cache::TtlCache;
pub use config::AssistantConfig;
pub use error::{AssistantError, Result};
pub use model::{CoinId, MarketSnapshot, NewsItem, PriceQuote, PriceRoute};
pub use report::{AssistantReport, Metric};
pub use resolver::resolve;
