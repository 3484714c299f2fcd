//! Community feed handlers: list and create.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{CreatePostRequest, PostListResponse, PostResponse};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError};

/// `GET /post` — List every post.
///
/// # Errors
///
/// Returns [`GatewayError::PersistenceError`] if the store fails.
#[utoipa::path(
    get,
    path = "/api/v1/post",
    tag = "Posts",
    summary = "List posts",
    description = "Returns all community posts in insertion order. No filtering or pagination.",
    responses(
        (status = 200, description = "All posts", body = PostListResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn list_posts(State(state): State<AppState>) -> Result<impl IntoResponse, GatewayError> {
    let data = state.posts.list_posts().await?;
    Ok(Json(PostListResponse {
        success: true,
        data,
    }))
}

/// `POST /post` — Share an image to the community feed.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] for blank fields and a `500`
/// carrying the raw upstream message if the upload or insert fails.
#[utoipa::path(
    post,
    path = "/api/v1/post",
    tag = "Posts",
    summary = "Create a post",
    description = "Uploads the photo to the image host, then stores the post with the hosted URL.",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created", body = PostResponse),
        (status = 400, description = "Missing field", body = ErrorResponse),
        (status = 500, description = "Upload or store failure", body = ErrorResponse),
    )
)]
pub async fn create_post(
    State(state): State<AppState>,
    Json(req): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let post = state.posts.create_post(req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(PostResponse {
            success: true,
            data: post,
        }),
    ))
}

/// Post routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/post", get(list_posts).post(create_post))
}
