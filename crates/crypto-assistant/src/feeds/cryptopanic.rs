//! CryptoPanic news client

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client as HttpClient, RequestBuilder, Url};
use serde::Deserialize;
use tracing::{debug, warn};

use super::NewsFeed;
use crate::config::AssistantConfig;
use crate::error::{AssistantError, Result};
use crate::model::NewsItem;

#[derive(Debug, Deserialize)]
struct PostsResponse {
    results: Vec<Post>,
}

#[derive(Debug, Deserialize)]
struct Post {
    title: String,
    source: PostSource,
    published_at: DateTime<Utc>,
    url: String,
}

#[derive(Debug, Deserialize)]
struct PostSource {
    title: String,
}

impl From<Post> for NewsItem {
    fn from(post: Post) -> Self {
        Self {
            url: web_link(post.url),
            title: post.title,
            source: post.source.title,
            published_at: post.published_at,
        }
    }
}

/// Keep only http(s) links; anything else becomes an empty string
fn web_link(raw: String) -> String {
    match Url::parse(&raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => raw,
        _ => String::new(),
    }
}

/// HTTP client for the CryptoPanic posts API
pub struct CryptoPanicClient {
    http: HttpClient,
    base_url: String,
    api_key: Option<String>,
}

impl CryptoPanicClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>, timeout: Duration) -> Self {
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            base_url: base_url.into(),
            api_key,
        }
    }

    pub fn from_config(config: &AssistantConfig) -> Self {
        Self::new(
            config.cryptopanic_api_url.clone(),
            config.cryptopanic_api_key.clone(),
            config.http_timeout(),
        )
    }

    fn posts_request(&self, api_key: &str, ticker: &str) -> RequestBuilder {
        let currency = ticker.to_uppercase();
        self.http
            .get(format!("{}/posts/", self.base_url))
            .query(&[
                ("auth_token", api_key),
                ("public", "true"),
                ("filter", "rising"),
                ("currencies", currency.as_str()),
            ])
    }
}

#[async_trait]
impl NewsFeed for CryptoPanicClient {
    async fn rising_posts(&self, ticker: &str) -> Result<Vec<NewsItem>> {
        let api_key = self.api_key
            .as_deref()
            .ok_or(AssistantError::MissingApiKey("CRYPTOPANIC_API_KEY"))?;

        debug!(ticker, "Fetching CryptoPanic posts");

        let response = self.posts_request(api_key, ticker).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AssistantError::UpstreamStatus {
                service: "CryptoPanic",
                status: status.as_u16(),
            });
        }

        let posts: PostsResponse = response.json().await?;
        Ok(posts.results.into_iter().map(NewsItem::from).collect())
    }

    fn name(&self) -> &str {
        "CryptoPanic"
    }
}
