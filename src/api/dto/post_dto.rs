//! Community post DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Post;
use crate::service::PostSubmission;

/// Request body for `POST /api/v1/post`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePostRequest {
    /// Author's display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Prompt the image was generated from.
    #[serde(default)]
    pub prompt: Option<String>,
    /// Image to share, as a `data:image/...;base64,` URI.
    #[serde(default)]
    pub photo: Option<String>,
}

impl From<CreatePostRequest> for PostSubmission {
    fn from(req: CreatePostRequest) -> Self {
        Self {
            name: req.name.unwrap_or_default(),
            prompt: req.prompt.unwrap_or_default(),
            photo: req.photo.unwrap_or_default(),
        }
    }
}

/// Response body for `POST /api/v1/post` (201 Created).
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostResponse {
    /// Always `true`.
    pub success: bool,
    /// The stored post.
    pub data: Post,
}

/// Response body for `GET /api/v1/post`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostListResponse {
    /// Always `true`.
    pub success: bool,
    /// Every post in insertion order.
    pub data: Vec<Post>,
}
