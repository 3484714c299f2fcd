//! Typed client for the gateway's REST API.
//!
//! [`ApiClient`] mirrors what the web front end does: it generates an image,
//! retrying while the provider reports the model is loading, shares the
//! result to the community feed, and lists the feed. The submodules hold
//! the pure front-end helpers ([`config`], [`feed`], [`prompts`]).

pub mod config;
pub mod feed;
pub mod prompts;

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;

use crate::api::dto::{GenerateImageResponse, PostListResponse, PostResponse};
use crate::domain::Post;

pub use config::api_base_url;
pub use feed::{download_file_name, newest_first, search_posts};
pub use prompts::surprise_prompt;

/// Delay between attempts while the model is loading.
pub const DEFAULT_LOADING_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Attempts made before giving up on a loading model.
pub const DEFAULT_MAX_LOADING_ATTEMPTS: u32 = 12;

/// Client-side failures.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request was not sent because its input is incomplete.
    #[error("{0}")]
    Validation(String),

    /// The gateway answered with an error.
    #[error("gateway returned {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message from the error body.
        message: String,
    },

    /// The model was still loading after every allowed attempt.
    #[error("model still loading after {attempts} attempts")]
    ModelStillLoading {
        /// Attempts made.
        attempts: u32,
    },

    /// Connection or decoding failure.
    #[error("{0}")]
    Http(#[from] reqwest::Error),
}

/// An image ready to preview or share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// `data:image/png;base64,...` URI.
    pub data_uri: String,
    /// Set when the gateway fell back to its placeholder image.
    pub warning: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    loading: bool,
}

/// HTTP client for one gateway deployment.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    loading_retry_delay: Duration,
    max_loading_attempts: u32,
}

impl ApiClient {
    /// Creates a client for the gateway at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            loading_retry_delay: DEFAULT_LOADING_RETRY_DELAY,
            max_loading_attempts: DEFAULT_MAX_LOADING_ATTEMPTS,
        }
    }

    /// Creates a client for a page served from `hostname`.
    #[must_use]
    pub fn for_hostname(hostname: &str) -> Self {
        Self::new(api_base_url(hostname))
    }

    /// Overrides the loading-retry policy.
    #[must_use]
    pub fn with_loading_retry(mut self, delay: Duration, max_attempts: u32) -> Self {
        self.loading_retry_delay = delay;
        self.max_loading_attempts = max_attempts.max(1);
        self
    }

    /// Returns the gateway URL this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Generates an image for `prompt`.
    ///
    /// While the gateway answers `503` with `loading: true`, waits and tries
    /// again, up to the configured number of attempts.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Validation`] if the prompt is blank.
    /// - [`ClientError::ModelStillLoading`] if every attempt hit a loading model.
    /// - [`ClientError::Api`] for any other error answer.
    /// - [`ClientError::Http`] on connection or decoding failure.
    pub async fn generate_image(&self, prompt: &str) -> Result<GeneratedImage, ClientError> {
        if prompt.trim().is_empty() {
            return Err(ClientError::Validation(
                "Please provide proper prompt".to_string(),
            ));
        }

        let url = self.url("/api/v1/dalle");
        for attempt in 1..=self.max_loading_attempts {
            let response = self
                .http
                .post(&url)
                .json(&serde_json::json!({ "prompt": prompt }))
                .send()
                .await?;

            let status = response.status();
            if status.is_success() {
                let body: GenerateImageResponse = response.json().await?;
                if body.photo.is_empty() {
                    return Err(ClientError::Api {
                        status: status.as_u16(),
                        message: body
                            .message
                            .unwrap_or_else(|| "Failed to generate image".to_string()),
                    });
                }
                let warning = if body.error.unwrap_or(false) {
                    Some(body.message.unwrap_or_else(|| {
                        "Image generation had an issue. Using placeholder image.".to_string()
                    }))
                } else {
                    None
                };
                return Ok(GeneratedImage {
                    data_uri: format!("data:image/png;base64,{}", body.photo),
                    warning,
                });
            }

            let body: ErrorBody = response.json().await.unwrap_or_default();
            if status == StatusCode::SERVICE_UNAVAILABLE && body.loading {
                tracing::info!(attempt, "model is loading; retrying");
                if attempt < self.max_loading_attempts {
                    tokio::time::sleep(self.loading_retry_delay).await;
                }
                continue;
            }
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: body
                    .message
                    .unwrap_or_else(|| "Failed to generate image".to_string()),
            });
        }

        Err(ClientError::ModelStillLoading {
            attempts: self.max_loading_attempts,
        })
    }

    /// Shares a generated image to the community feed.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Validation`] if the prompt or photo is blank.
    /// - [`ClientError::Api`] if the gateway rejects the post.
    /// - [`ClientError::Http`] on connection or decoding failure.
    pub async fn share_post(
        &self,
        name: &str,
        prompt: &str,
        photo: &str,
    ) -> Result<Post, ClientError> {
        if prompt.trim().is_empty() || photo.trim().is_empty() {
            return Err(ClientError::Validation(
                "Please generate an image with proper details".to_string(),
            ));
        }

        let response = self
            .http
            .post(self.url("/api/v1/post"))
            .json(&serde_json::json!({ "name": name, "prompt": prompt, "photo": photo }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: ErrorBody = response.json().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: body
                    .message
                    .unwrap_or_else(|| "Failed to share to community".to_string()),
            });
        }

        let body: PostResponse = response.json().await?;
        Ok(body.data)
    }

    /// Lists the community feed in server order (oldest first).
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] if the gateway answers with an error.
    /// - [`ClientError::Http`] on connection or decoding failure.
    pub async fn list_posts(&self) -> Result<Vec<Post>, ClientError> {
        let response = self.http.get(self.url("/api/v1/post")).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body: ErrorBody = response.json().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: body
                    .message
                    .unwrap_or_else(|| format!("request failed with status {status}")),
            });
        }

        let body: PostListResponse = response.json().await?;
        Ok(body.data)
    }
}
