//! Image generation DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::service::Generation;

/// Request body for `POST /api/v1/dalle`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct GenerateImageRequest {
    /// Text describing the desired image. Required, non-blank.
    #[serde(default)]
    pub prompt: Option<String>,
}

impl GenerateImageRequest {
    /// Returns the prompt, treating `null` or a missing field as blank.
    #[must_use]
    pub fn prompt(&self) -> &str {
        self.prompt.as_deref().unwrap_or_default()
    }
}

/// Response body for `POST /api/v1/dalle` (200 OK).
///
/// When generation failed, `photo` holds the placeholder image, `error` is
/// `true` and `message` explains why.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GenerateImageResponse {
    /// Base64-encoded PNG.
    pub photo: String,
    /// Set when `photo` is the placeholder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<bool>,
    /// Failure description accompanying the placeholder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<Generation> for GenerateImageResponse {
    fn from(generation: Generation) -> Self {
        match generation {
            Generation::Image { photo, .. } => Self {
                photo: photo.to_string(),
                error: None,
                message: None,
            },
            Generation::Placeholder { photo, message } => Self {
                photo: photo.to_string(),
                error: Some(true),
                message: Some(message),
            },
        }
    }
}
