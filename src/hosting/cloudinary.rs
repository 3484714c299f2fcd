//! Cloudinary signed uploads.
//!
//! Uploads go to `POST {api_base}/v1_1/{cloud_name}/image/upload` as JSON.
//! Requests are signed with SHA-256 over the sorted signed parameters
//! (only `timestamp` here) followed by the API secret.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::ImageHost;
use crate::config::{GatewayConfig, Secret};
use crate::error::GatewayError;

#[derive(Debug, Serialize)]
struct UploadRequest<'a> {
    file: &'a str,
    api_key: &'a str,
    timestamp: i64,
    signature: String,
    signature_algorithm: &'static str,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    secure_url: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorMessage,
}

#[derive(Debug, Deserialize)]
struct ErrorMessage {
    message: String,
}

/// Computes the upload signature for `timestamp`.
#[must_use]
pub fn sign_upload(timestamp: i64, api_secret: &Secret) -> String {
    let payload = format!("timestamp={timestamp}{}", api_secret.expose());
    hex::encode(Sha256::digest(payload.as_bytes()))
}

/// Cloudinary upload client.
#[derive(Clone)]
pub struct CloudinaryHost {
    http: reqwest::Client,
    api_base: String,
    cloud_name: String,
    api_key: String,
    api_secret: Secret,
}

impl fmt::Debug for CloudinaryHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudinaryHost")
            .field("api_base", &self.api_base)
            .field("cloud_name", &self.cloud_name)
            .field("api_key_set", &!self.api_key.is_empty())
            .field("api_secret", &self.api_secret)
            .finish_non_exhaustive()
    }
}

impl CloudinaryHost {
    /// Creates an upload client.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Internal`] if the HTTP client cannot be built.
    pub fn new(
        api_base: impl Into<String>,
        cloud_name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: Secret,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Internal(format!("hosting client: {e}")))?;
        Ok(Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            cloud_name: cloud_name.into(),
            api_key: api_key.into(),
            api_secret,
        })
    }

    /// Creates an upload client from the gateway configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Internal`] if the HTTP client cannot be built.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let host = Self::new(
            config.cloudinary_api_base.clone(),
            config.cloudinary_cloud_name.clone(),
            config.cloudinary_api_key.clone(),
            config.cloudinary_api_secret.clone(),
            config.hosting_timeout(),
        )?;
        tracing::info!(
            cloud_name_set = !host.cloud_name.is_empty(),
            api_key_set = !host.api_key.is_empty(),
            api_secret_set = !host.api_secret.is_empty(),
            "image hosting configured"
        );
        Ok(host)
    }

    fn is_configured(&self) -> bool {
        !self.cloud_name.is_empty() && !self.api_key.is_empty() && !self.api_secret.is_empty()
    }

    fn upload_url(&self) -> String {
        format!("{}/v1_1/{}/image/upload", self.api_base, self.cloud_name)
    }
}

#[async_trait]
impl ImageHost for CloudinaryHost {
    async fn upload(&self, source: &str) -> Result<String, GatewayError> {
        if !self.is_configured() {
            return Err(GatewayError::Hosting(
                "image hosting is not configured".to_string(),
            ));
        }

        let timestamp = Utc::now().timestamp();
        let request = UploadRequest {
            file: source,
            api_key: &self.api_key,
            timestamp,
            signature: sign_upload(timestamp, &self.api_secret),
            signature_algorithm: "sha256",
        };

        let response = self
            .http
            .post(self.upload_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| GatewayError::Hosting(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| format!("upload failed with status {}", status.as_u16()));
            return Err(GatewayError::Hosting(message));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Hosting(e.to_string()))?;
        let url = body.secure_url.or(body.url).ok_or_else(|| {
            GatewayError::Hosting("upload response did not include a URL".to_string())
        })?;

        tracing::info!(url = %url, "image uploaded");
        Ok(url)
    }
}
