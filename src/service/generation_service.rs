//! Generation service: cache lookup in front of the inference provider.

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::domain::{ImageCache, PromptKey, placeholder_photo};
use crate::error::GatewayError;
use crate::inference::{InferenceClient, InferenceError};

/// Result of a generation request that did not fail outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation {
    /// A real image, freshly generated or served from the cache.
    Image {
        /// Base64-encoded image bytes.
        photo: Arc<str>,
        /// `true` if the image came from the cache.
        cached: bool,
    },
    /// The provider failed; the bundled placeholder stands in.
    Placeholder {
        /// Base64-encoded placeholder image.
        photo: &'static str,
        /// Description of the underlying failure.
        message: String,
    },
}

impl Generation {
    /// Returns the base64 payload regardless of variant.
    #[must_use]
    pub fn photo(&self) -> &str {
        match self {
            Self::Image { photo, .. } => &**photo,
            Self::Placeholder { photo, .. } => *photo,
        }
    }
}

/// Turns prompts into images.
///
/// Every call follows the same path: validate → look up the cache → on a
/// miss call the provider once → cache the result. Placeholders and
/// "model loading" answers are never cached.
#[derive(Debug, Clone)]
pub struct GenerationService {
    cache: Arc<ImageCache>,
    inference: InferenceClient,
}

impl GenerationService {
    /// Creates a new `GenerationService`.
    #[must_use]
    pub fn new(cache: Arc<ImageCache>, inference: InferenceClient) -> Self {
        Self { cache, inference }
    }

    /// Returns a reference to the shared [`ImageCache`].
    #[must_use]
    pub fn cache(&self) -> &Arc<ImageCache> {
        &self.cache
    }

    /// Generates (or recalls) the image for `prompt`.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::InvalidRequest`] if the prompt is blank.
    /// - [`GatewayError::ModelLoading`] if the provider is still loading the
    ///   model; the client should retry later.
    ///
    /// Every other provider failure yields [`Generation::Placeholder`].
    pub async fn generate(&self, prompt: &str) -> Result<Generation, GatewayError> {
        if prompt.trim().is_empty() {
            return Err(GatewayError::InvalidRequest("Prompt is required".to_string()));
        }

        let key = PromptKey::from_prompt(prompt);
        tracing::info!(key = %key, "creating image");

        if let Some(photo) = self.cache.get(&key).await {
            tracing::info!(key = %key, "returning cached image");
            return Ok(Generation::Image { photo, cached: true });
        }

        match self.inference.text_to_image(prompt).await {
            Ok(bytes) => {
                let photo: Arc<str> = Arc::from(STANDARD.encode(&bytes));
                tracing::info!(
                    key = %key,
                    image_bytes = bytes.len(),
                    base64_len = photo.len(),
                    "image generated"
                );
                self.cache.insert(key, Arc::clone(&photo)).await;
                Ok(Generation::Image {
                    photo,
                    cached: false,
                })
            }
            Err(InferenceError::ModelLoading) => {
                tracing::info!(key = %key, "model is loading");
                Err(GatewayError::ModelLoading)
            }
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "generation failed; using placeholder");
                Ok(Generation::Placeholder {
                    photo: placeholder_photo(),
                    message: format!("Image generation failed - using placeholder. Error: {err}"),
                })
            }
        }
    }
}
