//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::{GenerationService, PostService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Prompt-to-image generation behind the cache.
    pub generation: Arc<GenerationService>,
    /// Community feed.
    pub posts: Arc<PostService>,
}
