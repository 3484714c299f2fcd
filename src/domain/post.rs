//! Community feed posts.
//!
//! [`PostId`] is a newtype wrapper around [`uuid::Uuid`] (v4) so post
//! identifiers cannot be confused with other UUIDs. [`Post`] is the stored
//! record; [`NewPost`] is what the service hands to a store after the photo
//! has been uploaded.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Unique identifier for a community post.
///
/// Generated once when the post is stored and immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct PostId(uuid::Uuid);

impl PostId {
    /// Creates a new random `PostId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Creates a `PostId` from an existing [`uuid::Uuid`].
    #[must_use]
    pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner [`uuid::Uuid`].
    #[must_use]
    pub const fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for PostId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<uuid::Uuid> for PostId {
    fn from(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }
}

impl From<PostId> for uuid::Uuid {
    fn from(id: PostId) -> Self {
        id.0
    }
}

/// A generated image shared to the community feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Post {
    /// Store-assigned identifier.
    pub id: PostId,
    /// Author's display name.
    pub name: String,
    /// Prompt the image was generated from.
    pub prompt: String,
    /// Durable URL of the hosted image.
    pub photo: String,
    /// When the post was stored.
    pub created_at: DateTime<Utc>,
}

/// A post ready to be written: the photo is already a hosted URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    /// Author's display name.
    pub name: String,
    /// Prompt the image was generated from.
    pub prompt: String,
    /// Durable URL of the hosted image.
    pub photo: String,
}

impl NewPost {
    /// Stamps the record with an identifier and creation time.
    #[must_use]
    pub fn into_post(self, id: PostId, created_at: DateTime<Utc>) -> Post {
        Post {
            id,
            name: self.name,
            prompt: self.prompt,
            photo: self.photo,
            created_at,
        }
    }
}
