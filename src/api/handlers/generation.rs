//! Image generation handlers.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{GenerateImageRequest, GenerateImageResponse};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError, ModelLoadingResponse};

/// Greeting served on `GET /api/v1/dalle`.
pub const GENERATION_GREETING: &str = "Hello from Image Generator API!";

/// `POST /dalle` — Generate an image from a prompt.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] for a blank prompt and
/// [`GatewayError::ModelLoading`] while the provider warms up. Other
/// provider failures still answer `200` with the placeholder image.
#[utoipa::path(
    post,
    path = "/api/v1/dalle",
    tag = "Generation",
    summary = "Generate an image",
    description = "Returns a base64 PNG for the prompt. Identical prompts (ignoring case and whitespace) are served from an in-memory cache. If the provider fails, a placeholder image is returned with `error: true`.",
    request_body = GenerateImageRequest,
    responses(
        (status = 200, description = "Generated, cached, or placeholder image", body = GenerateImageResponse),
        (status = 400, description = "Prompt is missing or blank", body = ErrorResponse),
        (status = 503, description = "Model is loading; retry shortly", body = ModelLoadingResponse),
    )
)]
pub async fn generate_image(
    State(state): State<AppState>,
    Json(req): Json<GenerateImageRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let generation = state.generation.generate(req.prompt()).await?;
    Ok(Json(GenerateImageResponse::from(generation)))
}

/// `GET /dalle` — Plain-text liveness greeting for the generation route.
#[utoipa::path(
    get,
    path = "/api/v1/dalle",
    tag = "Generation",
    summary = "Generation greeting",
    responses(
        (status = 200, description = "Greeting", body = String, content_type = "text/plain"),
    )
)]
pub async fn generation_greeting() -> &'static str {
    GENERATION_GREETING
}

/// Generation routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/dalle", post(generate_image).get(generation_greeting))
}
