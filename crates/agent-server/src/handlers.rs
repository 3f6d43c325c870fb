//! HTTP Handlers

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use agent_core::ModelInfo;
use crypto_assistant::{AssistantError, AssistantReport, Metric};

use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub llm_provider: String,
    pub llm_connected: bool,
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    #[serde(flatten)]
    pub report: AssistantReport,

    /// Display-ready metrics panel
    pub metrics: Vec<Metric>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,

    /// Lookups that failed before the request was given up
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: impl Into<String>, code: &str) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            code: code.into(),
            warnings: Vec::new(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let llm_connected = state.provider.health_check().await.unwrap_or(false);

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        llm_provider: state.provider.name().to_string(),
        llm_connected,
    })
}

/// Models available on the language-model service
pub async fn list_models(
    State(state): State<AppState>,
) -> Result<Json<Vec<ModelInfo>>, ApiError> {
    state.provider.list_models().await.map(Json).map_err(|e| {
        tracing::warn!("Model listing failed: {}", e);
        api_error(StatusCode::SERVICE_UNAVAILABLE, e.user_message(), "LLM_UNAVAILABLE")
    })
}

/// Answer a free-text question about a coin
pub async fn ask_handler(
    State(state): State<AppState>,
    Json(payload): Json<AskRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    if payload.query.trim().is_empty() {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "Ask about a cryptocurrency, e.g. 'What's the latest news about Ethereum?'",
            "EMPTY_QUERY",
        ));
    }

    let report = state.assistant.ask(&payload.query).await.map_err(|e| {
        match e {
            AssistantError::UnsupportedCoin { ref warnings, .. } => {
                tracing::info!("Unsupported coin for query {:?} ({} warnings)", payload.query, warnings.len());
                let (status, Json(mut body)) =
                    api_error(StatusCode::NOT_FOUND, e.user_message(), "UNSUPPORTED_COIN");
                body.warnings.clone_from(warnings);
                (status, Json(body))
            }
            other => {
                tracing::error!("Assistant error: {}", other);
                api_error(StatusCode::INTERNAL_SERVER_ERROR, other.user_message(), "ASSISTANT_ERROR")
            }
        }
    })?;

    let metrics = report.metrics();
    Ok(Json(AskResponse { report, metrics }))
}

/// Drop all cached lookups
pub async fn clear_cache(State(state): State<AppState>) -> StatusCode {
    state.assistant.invalidate_caches();
    tracing::info!("Lookup caches cleared");
    StatusCode::NO_CONTENT
}
