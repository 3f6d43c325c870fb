//! crypto-assistant HTTP Server
//!
//! Axum-based server exposing the assistant as a JSON API plus a static
//! single-page UI (one question box, narrative and metrics/news panes).

mod handlers;
mod state;

use std::sync::Arc;

use axum::{routing::{get, post}, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agent_core::LlmProvider;
use agent_runtime::{OllamaConfig, OllamaProvider};
use crypto_assistant::{AssistantConfig, CryptoAssistant};

use crate::handlers::{ask_handler, clear_cache, health_check, list_models};
use crate::state::AppState;

fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".into());

    Router::new()
        // Health & info
        .route("/health", get(health_check))
        .route("/api/models", get(list_models))

        // Assistant API
        .route("/api/ask", post(ask_handler))
        .route("/api/cache/clear", post(clear_cache))

        // Static files (single-page UI)
        .fallback_service(ServeDir::new(static_dir))

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Initialize LLM provider
    let ollama_config = OllamaConfig::from_env();
    let generation = ollama_config.generation_options();
    let provider: Arc<dyn LlmProvider> = Arc::new(OllamaProvider::from_config(ollama_config));

    // Verify Ollama connection
    match provider.health_check().await {
        Ok(true) => {
            tracing::info!("✓ Connected to Ollama");
            if let Ok(models) = provider.list_models().await {
                for model in models {
                    tracing::info!("  Model: {}", model.id);
                }
            }
        }
        Ok(false) | Err(_) => {
            tracing::warn!("⚠ Ollama not available - summaries will be empty");
            tracing::warn!("  Make sure Ollama is running: ollama serve");
        }
    }
    tracing::info!("Summaries use model '{}' at temperature {}", generation.model, generation.temperature);

    // Initialize data sources
    let config = AssistantConfig::from_env();
    if config.coinmarketcap_api_key.is_none() {
        tracing::warn!("⚠ COINMARKETCAP_API_KEY not set - market data disabled");
    }
    if config.cryptopanic_api_key.is_none() {
        tracing::warn!("⚠ CRYPTOPANIC_API_KEY not set - news disabled");
    }

    let assistant = CryptoAssistant::from_config(&config, provider.clone(), generation);

    let state = AppState {
        provider,
        assistant: Arc::new(assistant),
    };

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 crypto-assistant running on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health          - Health check");
    tracing::info!("  GET  /api/models      - List available models");
    tracing::info!("  POST /api/ask         - Ask about a coin");
    tracing::info!("  POST /api/cache/clear - Drop cached lookups");
    tracing::info!("");

    axum::serve(listener, app(state)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_core::{AgentError, Completion, GenerationOptions, ModelInfo, Result as CoreResult};
    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use crypto_assistant::{
        exchange::MockExchangeClient,
        feeds::{MockMarketListings, MockNewsFeed},
    };
    use tower::ServiceExt;

    struct OfflineProvider;

    #[async_trait]
    impl LlmProvider for OfflineProvider {
        fn name(&self) -> &str {
            "Offline"
        }

        async fn health_check(&self) -> CoreResult<bool> {
            Ok(false)
        }

        async fn generate(&self, _prompt: &str, _options: &GenerationOptions) -> CoreResult<Completion> {
            Err(AgentError::ProviderUnavailable("connection refused".into()))
        }

        async fn list_models(&self) -> CoreResult<Vec<ModelInfo>> {
            Err(AgentError::ProviderUnavailable("connection refused".into()))
        }
    }

    fn test_app() -> Router {
        let provider: Arc<dyn LlmProvider> = Arc::new(OfflineProvider);
        let assistant = CryptoAssistant::new(
            Arc::new(MockExchangeClient::new()),
            Arc::new(MockNewsFeed::new().with_headlines("BTC", 2)),
            Arc::new(MockMarketListings::new()),
            provider.clone(),
            GenerationOptions::default(),
            &AssistantConfig::default(),
        );

        app(AppState {
            provider,
            assistant: Arc::new(assistant),
        })
    }

    fn ask(query: &str) -> Request<Body> {
        Request::post("/api/ask")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::json!({ "query": query }).to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_llm_offline() {
        let response = test_app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["llm_connected"], false);
        assert_eq!(body["llm_provider"], "Offline");
    }

    #[tokio::test]
    async fn test_ask_returns_report_without_summary() {
        let response = test_app().oneshot(ask("Tell me about Bitcoin")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["coin"], "bitcoin");
        assert_eq!(body["title"], "Results for Bitcoin");
        assert_eq!(body["summary"], "");
        assert_eq!(body["news"].as_array().unwrap().len(), 2);
        assert_eq!(body["metrics"][0]["label"], "Price");
        assert_eq!(body["warnings"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_coin_is_not_found() {
        let response = test_app().oneshot(ask("tell me about foocoin")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["code"], "UNSUPPORTED_COIN");
    }

    #[tokio::test]
    async fn test_feed_outage_reports_warnings() {
        let provider: Arc<dyn LlmProvider> = Arc::new(OfflineProvider);
        let assistant = CryptoAssistant::new(
            Arc::new(MockExchangeClient::new()),
            Arc::new(MockNewsFeed::failing()),
            Arc::new(MockMarketListings::failing()),
            provider.clone(),
            GenerationOptions::default(),
            &AssistantConfig::default(),
        );
        let router = app(AppState {
            provider,
            assistant: Arc::new(assistant),
        });

        let response = router.oneshot(ask("Tell me about Bitcoin")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert_eq!(body["code"], "UNSUPPORTED_COIN");
        let warnings = body["warnings"].as_array().unwrap();
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().any(|w| w.as_str().unwrap().contains("COINMARKETCAP_API_KEY")));
    }

    #[tokio::test]
    async fn test_unknown_coin_has_no_warnings() {
        let response = test_app().oneshot(ask("tell me about foocoin")).await.unwrap();
        assert!(json_body(response).await.get("warnings").is_none());
    }

    #[tokio::test]
    async fn test_blank_query_is_rejected() {
        let response = test_app().oneshot(ask("   ")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_models_unavailable() {
        let response = test_app()
            .oneshot(Request::get("/api/models").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_clear_cache() {
        let response = test_app()
            .oneshot(Request::post("/api/cache/clear").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
