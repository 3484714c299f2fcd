//! Client for the external text-to-image inference API.
//!
//! [`InferenceClient`] performs exactly one HTTP call per prompt with fixed
//! sampling parameters and a fixed timeout. It does not retry; callers
//! decide what a failure means (see [`crate::service::GenerationService`]).

use std::fmt;
use std::time::Duration;

use reqwest::{StatusCode, header};
use serde::Serialize;

use crate::config::{GatewayConfig, Secret};
use crate::error::GatewayError;

/// Longest provider error body kept for diagnostics.
const MAX_ERROR_BODY: usize = 512;

/// Failure modes of a single inference call.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    /// The provider answered `503`: the model is still being loaded.
    #[error("model is loading")]
    ModelLoading,

    /// The provider answered with any other non-success status.
    #[error("provider returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        body: String,
    },

    /// The provider answered `2xx` without any image bytes.
    #[error("provider returned an empty image")]
    EmptyImage,

    /// Connection, timeout, or body read failure.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

/// Sampling parameters sent with every request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationParameters {
    /// Things the model should avoid.
    pub negative_prompt: String,
    /// Diffusion steps.
    pub num_inference_steps: u32,
    /// Classifier-free guidance scale.
    pub guidance_scale: f32,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            negative_prompt: "blurry, bad quality".to_string(),
            num_inference_steps: 20,
            guidance_scale: 7.0,
            width: 1024,
            height: 1024,
        }
    }
}

#[derive(Debug, Serialize)]
struct InferenceOptions {
    use_cache: bool,
    wait_for_model: bool,
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: &'a GenerationParameters,
    options: InferenceOptions,
}

/// HTTP client bound to one text-to-image model endpoint.
#[derive(Clone)]
pub struct InferenceClient {
    http: reqwest::Client,
    model_url: String,
    token: Secret,
    parameters: GenerationParameters,
}

impl fmt::Debug for InferenceClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferenceClient")
            .field("model_url", &self.model_url)
            .field("token", &self.token)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

impl InferenceClient {
    /// Creates a client for `model_url` whose calls give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Internal`] if the HTTP client cannot be built.
    pub fn new(
        model_url: impl Into<String>,
        token: Secret,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Internal(format!("inference client: {e}")))?;
        Ok(Self {
            http,
            model_url: model_url.into(),
            token,
            parameters: GenerationParameters::default(),
        })
    }

    /// Creates a client from the gateway configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Internal`] if the HTTP client cannot be built.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, GatewayError> {
        if config.inference_token.is_empty() {
            tracing::warn!("HUGGING_FACE_ACCESS_TOKEN is not set; generation will likely fail");
        }
        Self::new(
            config.inference_model_url.clone(),
            config.inference_token.clone(),
            config.inference_timeout(),
        )
    }

    /// Returns the parameters sent with every request.
    #[must_use]
    pub fn parameters(&self) -> &GenerationParameters {
        &self.parameters
    }

    /// Generates one image for `prompt` and returns the raw image bytes.
    ///
    /// # Errors
    ///
    /// - [`InferenceError::ModelLoading`] if the provider answers `503`.
    /// - [`InferenceError::Status`] for any other non-success status.
    /// - [`InferenceError::EmptyImage`] if the body is empty.
    /// - [`InferenceError::Transport`] on connection failure or timeout.
    pub async fn text_to_image(&self, prompt: &str) -> Result<Vec<u8>, InferenceError> {
        let request = InferenceRequest {
            inputs: prompt,
            parameters: &self.parameters,
            options: InferenceOptions {
                use_cache: true,
                wait_for_model: true,
            },
        };

        let response = self
            .http
            .post(&self.model_url)
            .bearer_auth(self.token.expose())
            .header(header::ACCEPT, "image/png")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::SERVICE_UNAVAILABLE {
            return Err(InferenceError::ModelLoading);
        }
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let cut = (0..=MAX_ERROR_BODY)
                    .rev()
                    .find(|i| body.is_char_boundary(*i))
                    .unwrap_or(0);
                body.truncate(cut);
            }
            tracing::warn!(status = status.as_u16(), body = %body, "inference provider error");
            return Err(InferenceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
            .to_string();
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(InferenceError::EmptyImage);
        }

        tracing::debug!(size = bytes.len(), content_type = %content_type, "image generated");
        Ok(bytes.to_vec())
    }
}
