//! Post service: upload the photo, then record the post.

use std::sync::Arc;

use crate::domain::{NewPost, Post};
use crate::error::GatewayError;
use crate::hosting::ImageHost;
use crate::persistence::PostStore;

/// Input for [`PostService::create_post`], before the photo is hosted.
#[derive(Debug, Clone)]
pub struct PostSubmission {
    /// Author's display name.
    pub name: String,
    /// Prompt the image was generated from.
    pub prompt: String,
    /// Image to host, usually a `data:image/png;base64,...` URI.
    pub photo: String,
}

/// Orchestrates the community feed.
#[derive(Debug, Clone)]
pub struct PostService {
    store: Arc<dyn PostStore>,
    host: Arc<dyn ImageHost>,
}

impl PostService {
    /// Creates a new `PostService`.
    #[must_use]
    pub fn new(store: Arc<dyn PostStore>, host: Arc<dyn ImageHost>) -> Self {
        Self { store, host }
    }

    /// Returns every post, unfiltered, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] if the store fails.
    pub async fn list_posts(&self) -> Result<Vec<Post>, GatewayError> {
        self.store.list().await
    }

    /// Hosts the submitted photo and stores a post pointing at it.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::InvalidRequest`] if any field is blank.
    /// - [`GatewayError::Hosting`] if the upload fails; nothing is stored.
    /// - [`GatewayError::PersistenceError`] if the store fails.
    pub async fn create_post(&self, submission: PostSubmission) -> Result<Post, GatewayError> {
        for (field, value) in [
            ("name", &submission.name),
            ("prompt", &submission.prompt),
            ("photo", &submission.photo),
        ] {
            if value.trim().is_empty() {
                return Err(GatewayError::InvalidRequest(format!("{field} is required")));
            }
        }

        tracing::info!(name = %submission.name, "creating post");
        let url = self.host.upload(&submission.photo).await?;

        let post = self
            .store
            .insert(NewPost {
                name: submission.name,
                prompt: submission.prompt,
                photo: url,
            })
            .await?;

        tracing::info!(post_id = %post.id, "post created");
        Ok(post)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::persistence::MemoryPostStore;
    use crate::test_support::FakeImageHost;

    fn submission() -> PostSubmission {
        PostSubmission {
            name: "Ada".to_string(),
            prompt: "a lighthouse at dusk".to_string(),
            photo: "data:image/png;base64,AAAA".to_string(),
        }
    }

    fn make_service(host: FakeImageHost) -> (PostService, Arc<FakeImageHost>) {
        let host = Arc::new(host);
        let service = PostService::new(
            Arc::new(MemoryPostStore::new()),
            Arc::clone(&host) as Arc<dyn ImageHost>,
        );
        (service, host)
    }

    #[tokio::test]
    async fn created_post_appears_in_list() {
        let (service, _) = make_service(FakeImageHost::ok());

        let Ok(created) = service.create_post(submission()).await else {
            panic!("create failed");
        };
        assert_eq!(created.photo, "https://img.test/upload-0.png");

        let Ok(posts) = service.list_posts().await else {
            panic!("list failed");
        };
        assert_eq!(posts, vec![created]);
    }

    #[tokio::test]
    async fn blank_fields_are_rejected_before_upload() {
        let (service, host) = make_service(FakeImageHost::ok());

        let mut missing_name = submission();
        missing_name.name = "  ".to_string();
        let mut missing_photo = submission();
        missing_photo.photo = String::new();

        for bad in [missing_name, missing_photo] {
            let result = service.create_post(bad).await;
            assert!(matches!(result, Err(GatewayError::InvalidRequest(_))));
        }
        assert_eq!(host.uploads(), 0);
    }

    #[tokio::test]
    async fn upload_failure_stores_nothing() {
        let (service, host) = make_service(FakeImageHost::failing("Invalid Signature"));

        let Err(GatewayError::Hosting(message)) = service.create_post(submission()).await else {
            panic!("expected hosting error");
        };
        assert_eq!(message, "Invalid Signature");
        assert_eq!(host.uploads(), 1);

        let Ok(posts) = service.list_posts().await else {
            panic!("list failed");
        };
        assert!(posts.is_empty());
    }
}
