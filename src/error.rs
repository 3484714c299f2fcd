//! Gateway error types with HTTP status code mapping.
//!
//! [`GatewayError`] is the central error type for the gateway. Each variant
//! maps to a specific HTTP status code and a JSON error body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Message sent to clients while the inference model warms up.
pub const MODEL_LOADING_MESSAGE: &str =
    "The model is currently loading. Please try again in a moment.";

/// JSON error response body.
///
/// All error responses except "model loading" follow this shape:
/// ```json
/// {
///   "success": false,
///   "message": "Prompt is required",
///   "code": 1001
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Human-readable error message.
    pub message: String,
    /// Numeric error code (see [`GatewayError::error_code`]).
    pub code: u32,
}

/// Body returned with `503` while the provider is loading the model.
///
/// Clients are expected to retry after a short delay when `loading` is set.
#[derive(Debug, Serialize, ToSchema)]
pub struct ModelLoadingResponse {
    /// Human-readable retry hint.
    pub message: String,
    /// Always `true`.
    pub loading: bool,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category          | HTTP Status                |
/// |-----------|-------------------|----------------------------|
/// | 1000–1999 | Validation        | 400 Bad Request            |
/// | 2000–2999 | Inference         | 503 Service Unavailable    |
/// | 3000–3999 | Server / upstream | 500 Internal Server Error  |
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Request validation failed.
    #[error("{0}")]
    InvalidRequest(String),

    /// The inference provider is still loading the model.
    #[error("model loading")]
    ModelLoading,

    /// Image hosting upload failed.
    #[error("{0}")]
    Hosting(String),

    /// Document store failure.
    #[error("{0}")]
    PersistenceError(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::ModelLoading => 2001,
            Self::Internal(_) => 3000,
            Self::PersistenceError(_) => 3001,
            Self::Hosting(_) => 3002,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::ModelLoading => StatusCode::SERVICE_UNAVAILABLE,
            Self::Hosting(_) | Self::PersistenceError(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<sqlx::Error> for GatewayError {
    fn from(err: sqlx::Error) -> Self {
        Self::PersistenceError(err.to_string())
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let mut response = match self {
            Self::ModelLoading => axum::Json(ModelLoadingResponse {
                message: MODEL_LOADING_MESSAGE.to_string(),
                loading: true,
            })
            .into_response(),
            other => {
                if status.is_server_error() {
                    tracing::error!(code = other.error_code(), error = %other, "request failed");
                }
                axum::Json(ErrorResponse {
                    success: false,
                    code: other.error_code(),
                    message: other.to_string(),
                })
                .into_response()
            }
        };
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let Ok(bytes) = axum::body::to_bytes(response.into_body(), usize::MAX).await else {
            panic!("body read failed");
        };
        let Ok(value) = serde_json::from_slice(&bytes) else {
            panic!("body is not JSON");
        };
        value
    }

    #[tokio::test]
    async fn invalid_request_renders_400_with_message() {
        let response = GatewayError::InvalidRequest("Prompt is required".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], 1001);
        assert_eq!(body["message"], "Prompt is required");
    }

    #[tokio::test]
    async fn model_loading_renders_503_with_loading_flag() {
        let response = GatewayError::ModelLoading.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = body_json(response).await;
        assert_eq!(body["loading"], true);
        assert_eq!(body["message"], MODEL_LOADING_MESSAGE);
    }

    #[tokio::test]
    async fn upstream_failures_carry_raw_message() {
        let response = GatewayError::Hosting("Invalid Signature".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Invalid Signature");
        assert_eq!(body["code"], 3002);
    }
}
