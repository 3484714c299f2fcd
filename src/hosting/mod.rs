//! Image hosting: turns a submitted photo into a durable URL.
//!
//! [`ImageHost`] is the seam the post service uploads through.
//! [`cloudinary::CloudinaryHost`] is the production implementation.

pub mod cloudinary;

use async_trait::async_trait;

use crate::error::GatewayError;

pub use cloudinary::CloudinaryHost;

/// An external service that stores an image and returns its public URL.
#[async_trait]
pub trait ImageHost: Send + Sync + std::fmt::Debug {
    /// Uploads `source` (a data URI or a remote URL) and returns the durable
    /// URL of the stored copy.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Hosting`] with the provider's message if the
    /// upload is rejected or the service cannot be reached.
    async fn upload(&self, source: &str) -> Result<String, GatewayError>;
}
