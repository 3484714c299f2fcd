//! In-process post store.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::PostStore;
use crate::domain::{NewPost, Post, PostId};
use crate::error::GatewayError;

/// Keeps posts in a `Vec` behind a [`RwLock`]. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryPostStore {
    posts: RwLock<Vec<Post>>,
}

impl MemoryPostStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn list(&self) -> Result<Vec<Post>, GatewayError> {
        Ok(self.posts.read().await.clone())
    }

    async fn insert(&self, post: NewPost) -> Result<Post, GatewayError> {
        let post = post.into_post(PostId::new(), Utc::now());
        self.posts.write().await.push(post.clone());
        Ok(post)
    }
}
