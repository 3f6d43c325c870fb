//! # agent-core
//!
//! Provider-agnostic LLM abstraction shared by the runtime and the assistant.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐      ┌──────────────────┐      ┌──────────────┐
//! │ crypto-assistant │─────▶│   LlmProvider    │◀─────│ agent-runtime│
//! │   (summarizer)   │      │   (Strategy)     │      │   (Ollama)   │
//! └──────────────────┘      └──────────────────┘      └──────────────┘
//! ```
//!
//! The `LlmProvider` trait lets the summarizer talk to Ollama, or to a test
//! double, without changing the aggregation logic.

pub mod provider;
pub mod error;

pub use error::{AgentError, Result};
pub use provider::{Completion, GenerationOptions, LlmProvider, ModelInfo};
