//! Persistence layer: the community post store.
//!
//! [`PostStore`] is the seam between the post service and the document
//! store. [`postgres::PostgresPostStore`] is the production implementation
//! backed by `sqlx::PgPool`; [`memory::MemoryPostStore`] keeps posts in
//! process memory and is used when persistence is disabled and in tests.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::domain::{NewPost, Post};
use crate::error::GatewayError;

pub use memory::MemoryPostStore;
pub use postgres::PostgresPostStore;

/// Durable storage for community posts.
///
/// Posts are only ever inserted and listed; the gateway never updates or
/// deletes them.
#[async_trait]
pub trait PostStore: Send + Sync + std::fmt::Debug {
    /// Returns every stored post in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on storage failure.
    async fn list(&self) -> Result<Vec<Post>, GatewayError>;

    /// Stores a new post and returns it with its assigned id and timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on storage failure.
    async fn insert(&self, post: NewPost) -> Result<Post, GatewayError>;
}
