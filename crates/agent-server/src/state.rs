//! Application State

use std::sync::Arc;

use agent_core::LlmProvider;
use crypto_assistant::CryptoAssistant;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// LLM provider (Ollama, etc.), kept for health and model listing
    pub provider: Arc<dyn LlmProvider>,

    /// Coin resolver, data aggregator and summarizer
    pub assistant: Arc<CryptoAssistant>,
}
