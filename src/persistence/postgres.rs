//! PostgreSQL implementation of the post store.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use super::PostStore;
use crate::config::GatewayConfig;
use crate::domain::{NewPost, Post, PostId};
use crate::error::GatewayError;

/// PostgreSQL-backed post store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresPostStore {
    pool: PgPool,
}

impl PostgresPostStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool sized from `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError::PersistenceError`] if the database cannot
    /// be reached.
    pub async fn connect(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Applies the embedded schema migrations.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError::PersistenceError`] if a migration fails.
    pub async fn migrate(&self) -> Result<(), GatewayError> {
        sqlx::migrate!()
            .run(&self.pool)
            .await
            .map_err(|e| GatewayError::PersistenceError(e.to_string()))
    }
}

#[async_trait]
impl PostStore for PostgresPostStore {
    async fn list(&self) -> Result<Vec<Post>, GatewayError> {
        let rows = sqlx::query_as::<_, (Uuid, String, String, String, DateTime<Utc>)>(
            "SELECT id, name, prompt, photo, created_at FROM posts \
             ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name, prompt, photo, created_at)| Post {
                id: PostId::from_uuid(id),
                name,
                prompt,
                photo,
                created_at,
            })
            .collect())
    }

    async fn insert(&self, post: NewPost) -> Result<Post, GatewayError> {
        let id = PostId::new();
        let created_at = sqlx::query_scalar::<_, DateTime<Utc>>(
            "INSERT INTO posts (id, name, prompt, photo) VALUES ($1, $2, $3, $4) \
             RETURNING created_at",
        )
        .bind(*id.as_uuid())
        .bind(&post.name)
        .bind(&post.prompt)
        .bind(&post.photo)
        .fetch_one(&self.pool)
        .await?;

        Ok(post.into_post(id, created_at))
    }
}
