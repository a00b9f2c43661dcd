//! Shared application state.
//!
//! Handlers see two services wrapping repository trait objects; the
//! concrete backend is picked here.

use std::sync::Arc;

use crate::config::Config;
use crate::services::{CommentService, PostService};
use crate::storage::InMemoryStorage;

/// Shared application state, cloned per request handler.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
    pub comments: Arc<CommentService>,
}

impl AppState {
    fn build(
        posts: Arc<dyn inkpost_core::storage::PostRepository>,
        comments: Arc<dyn inkpost_core::storage::CommentRepository>,
        config: &Config,
    ) -> Self {
        Self {
            posts: Arc::new(PostService::new(posts)),
            comments: Arc::new(CommentService::new(comments, config.admin_email.clone())),
        }
    }

    /// Creates state backed by in-process storage. No external services
    /// are touched; events and email are captured in memory.
    pub fn in_memory(config: &Config) -> Self {
        let storage = Arc::new(InMemoryStorage::new(config.images_bucket.clone()));
        Self::build(storage.clone(), storage, config)
    }

    /// Creates state backed by DynamoDB, S3, SNS, and SMTP.
    #[cfg(feature = "dynamodb")]
    pub async fn dynamodb(config: &Config) -> anyhow::Result<Self> {
        let storage = Arc::new(crate::storage::DynamoDbStorage::new(config).await?);
        Ok(Self::build(storage.clone(), storage, config))
    }
}
