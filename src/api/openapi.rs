//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

use super::handlers;

/// Generated OpenAPI description of every public endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "genimage-gateway",
        description = "Text-to-image generation with a prompt cache, and a shared community feed."
    ),
    paths(
        handlers::generation::generate_image,
        handlers::generation::generation_greeting,
        handlers::post::list_posts,
        handlers::post::create_post,
        handlers::system::root_handler,
        handlers::system::health_handler,
    ),
    tags(
        (name = "Generation", description = "Prompt to image"),
        (name = "Posts", description = "Community feed"),
        (name = "System", description = "Liveness and health"),
    )
)]
pub struct ApiDoc;
