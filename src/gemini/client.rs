//! Gemini REST API Client
//!
//! HTTP client for the hosted `generateContent` endpoint.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use super::types::{GenerateRequest, GenerateResponse};
use super::GenerativeModel;

/// Default endpoint of the Generative Language API
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Gemini REST API client
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

/// Configuration for the Gemini client
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Base URL (e.g., "https://generativelanguage.googleapis.com")
    pub base_url: String,
    /// API key; requests fail fast without one
    pub api_key: Option<String>,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Extra attempts after a rate-limited or unreachable first try
    pub max_retries: u32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            request_timeout_ms: 60_000,
            max_retries: 0,
        }
    }
}

impl GeminiClient {
    /// Create a new client with the given configuration
    pub fn new(config: GeminiConfig) -> Result<Self, GeminiError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .user_agent(concat!("fvg-portal/", env!("CARGO_PKG_VERSION")))
            .build()?;

        if config.api_key.as_deref().map_or(true, str::is_empty) {
            tracing::error!("Gemini API key is missing. AI features will not work.");
        }

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn api_key(&self) -> Result<&str, GeminiError> {
        self.config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(GeminiError::MissingApiKey)
    }

    /// URL of the generateContent method for a model
    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        )
    }

    /// Send a generateContent request with retry on rate limiting
    pub async fn generate_content(
        &self,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse, GeminiError> {
        let api_key = self.api_key()?;
        let url = self.endpoint(&request.model);
        let mut last_error = GeminiError::Unavailable;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                // Backoff: 1s, 4s, 9s...
                let delay = Duration::from_secs((attempt as u64).pow(2));
                tokio::time::sleep(delay).await;
            }

            tracing::debug!(model = %request.model, attempt, "Calling Gemini generateContent");

            let response = match self
                .client
                .post(&url)
                .header("x-goog-api-key", api_key)
                .json(request)
                .send()
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    last_error = GeminiError::from_transport(e);
                    continue;
                }
            };

            let status = response.status();
            if status.is_success() {
                let body: GenerateResponse = response.json().await.map_err(GeminiError::Request)?;
                if let Some(reason) = body.block_reason() {
                    return Err(GeminiError::Blocked(reason.to_string()));
                }
                return Ok(body);
            }

            if status == StatusCode::TOO_MANY_REQUESTS {
                tracing::warn!(model = %request.model, attempt, "Gemini rate limited");
                last_error = GeminiError::RateLimited;
                continue;
            }

            let text = response.text().await.unwrap_or_default();
            return Err(GeminiError::ApiError {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }

        Err(last_error)
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    fn is_configured(&self) -> bool {
        self.api_key().is_ok()
    }

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, GeminiError> {
        self.generate_content(&request).await
    }
}

// ============================================
// Error body
// ============================================

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: String,
}

/// Pull the human-readable message out of a Google API error body
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string())
}

// ============================================
// Errors
// ============================================

/// Errors that can occur when calling the hosted model
#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("API key is not configured")]
    MissingApiKey,

    #[error("Gemini unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Request timeout")]
    Timeout,

    #[error("Rate limited")]
    RateLimited,

    #[error("Prompt blocked: {0}")]
    Blocked(String),

    #[error("Model returned no {0}")]
    EmptyResponse(&'static str),
}

impl GeminiError {
    fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GeminiError::Timeout
        } else if e.is_connect() {
            GeminiError::Unavailable
        } else {
            GeminiError::Request(e)
        }
    }
}
