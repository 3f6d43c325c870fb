//! # agent-runtime
//!
//! Runtime providers for the crypto assistant.
//!
//! ## Providers
//!
//! - **Ollama** (default): Local LLM inference via Ollama
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agent_runtime::{OllamaConfig, OllamaProvider};
//!
//! let config = OllamaConfig::from_env();
//! let options = config.generation_options();
//! let provider = OllamaProvider::from_config(config);
//! let completion = provider.generate(prompt, &options).await?;
//! ```

#[cfg(feature = "ollama")]
pub mod ollama;

#[cfg(feature = "ollama")]
pub use ollama::{OllamaConfig, OllamaProvider};

// Re-export core types for convenience
pub use agent_core::{AgentError, Completion, GenerationOptions, LlmProvider, ModelInfo, Result};
