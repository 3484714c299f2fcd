//! Domain layer: posts, prompt cache keys, and the image cache.
//!
//! This module contains the server-side domain model: the community
//! [`Post`] record and its identity, the [`PromptKey`] normalization that
//! decides cache hits, the TTL [`ImageCache`], and the bundled placeholder
//! image.

pub mod image_cache;
pub mod placeholder;
pub mod post;
pub mod prompt_key;

pub use image_cache::ImageCache;
pub use placeholder::placeholder_photo;
pub use post::{NewPost, Post, PostId};
pub use prompt_key::PromptKey;
