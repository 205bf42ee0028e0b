//! MedInsight backend client
//!
//! The only wire contract of the application:
//!
//! - `POST {base}/api/analyze_articles` with a [`SearchRequest`] body,
//!   answered by a JSON array of [`Article`]s
//! - `GET {base}/health`, used for the status indicator
//!
//! Failures are surfaced once, immediately. There is no retry.

use crate::config::ApiConfig;
use crate::models::{Article, ErrorBody, SearchRequest};
use crate::types::{ApiError, ApiResult};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

const ANALYZE_PATH: &str = "/api/analyze_articles";
const HEALTH_PATH: &str = "/health";
const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Anything that can turn a search request into analyzed articles
#[async_trait]
pub trait ArticleAnalyzer: Send + Sync {
    async fn analyze(&self, request: &SearchRequest) -> ApiResult<Vec<Article>>;
}

/// reqwest-backed client for the analysis backend
#[derive(Debug, Clone)]
pub struct MedInsightClient {
    client: Client,
    base_url: String,
}

impl MedInsightClient {
    /// Create a client with an explicit request timeout
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("medinsight/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    /// Configure client from config
    pub fn from_config(config: &ApiConfig) -> ApiResult<Self> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Probe the backend health endpoint
    pub async fn health(&self) -> ApiResult<()> {
        let response = self
            .client
            .get(self.url(HEALTH_PATH))
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await
            .map_err(|e| ApiError::transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ApiError::RequestFailed {
                status: Some(status.as_u16()),
                message: Some(format!("Health check returned {}", status)),
            })
        }
    }
}

#[async_trait]
impl ArticleAnalyzer for MedInsightClient {
    async fn analyze(&self, request: &SearchRequest) -> ApiResult<Vec<Article>> {
        info!(
            keyword = %request.keyword,
            article_count = request.article_count,
            time_range_years = ?request.time_range_years,
            "Requesting article analysis"
        );

        let response = self
            .client
            .post(self.url(ANALYZE_PATH))
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Analysis request failed in transport");
                ApiError::transport(e.to_string())
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message_from_body(&body);
            warn!(status = status.as_u16(), message = ?message, "Backend rejected analysis request");
            return Err(ApiError::RequestFailed {
                status: Some(status.as_u16()),
                message,
            });
        }

        let articles: Vec<Article> = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to decode analysis response");
            ApiError::RequestFailed {
                status: Some(status.as_u16()),
                message: Some(format!("Failed to parse response: {}", e)),
            }
        })?;

        info!(count = articles.len(), "Article analysis completed");
        Ok(articles)
    }
}

/// Pull the most specific message out of an error body.
///
/// Any JSON object counts as the error detail; anything else yields `None`
/// so the caller can fall back to its generic message.
fn error_message_from_body(body: &str) -> Option<String> {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.best_message(),
        Err(_) => {
            debug!("Error body is not a JSON object");
            None
        }
    }
}
