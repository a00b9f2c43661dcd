use async_trait::async_trait;
use uuid::Uuid;

use crate::blog::{Comment, Event, Image, Post};
use crate::error::Result;

/// Repository for post records and their images.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Gets a post by its ID, failing with `RecordNotFound` if absent.
    async fn get(&self, id: Uuid) -> Result<Post>;

    /// Returns all posts, newest first.
    async fn list_by_date_reversed(&self) -> Result<Vec<Post>>;

    /// Inserts a new post.
    async fn insert(&self, post: &Post) -> Result<()>;

    /// Persists the changed fields of an existing post.
    async fn update(&self, post: &Post) -> Result<()>;

    /// Deletes a post by its ID.
    async fn delete(&self, id: Uuid) -> Result<()>;

    /// Uploads image bytes under the given key and returns the public
    /// image record. The key doubles as the image id.
    async fn upload_image(&self, data: &[u8], key: Uuid) -> Result<Image>;
}

/// Repository for comment records plus the side channels a comment's
/// lifecycle touches (event topic, outbound email).
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Gets a comment by its ID, failing with `RecordNotFound` if absent.
    async fn get(&self, id: Uuid) -> Result<Comment>;

    /// Returns all comments, newest first.
    async fn list_by_date_reversed(&self) -> Result<Vec<Comment>>;

    /// Inserts a new comment.
    async fn insert(&self, comment: &Comment) -> Result<()>;

    /// Persists the changed fields of an existing comment.
    async fn update(&self, comment: &Comment) -> Result<()>;

    /// Deletes a comment by its ID.
    async fn delete(&self, id: Uuid) -> Result<()>;

    /// Publishes a domain event on the notification topic.
    async fn dispatch_event(&self, event: &Event) -> Result<()>;

    /// Sends a notification email about a comment. `sender` falls back
    /// to the configured default when `None`.
    async fn send_email(
        &self,
        recipient: &str,
        comment: &Comment,
        sender: Option<&str>,
    ) -> Result<()>;
}
