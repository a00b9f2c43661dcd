use std::sync::Arc;

use uuid::Uuid;

use inkpost_core::blog::{
    Comment, CreateCommentRequest, DeleteCommentRequest, Event, GetCommentRequest,
};
use inkpost_core::storage::CommentRepository;
use inkpost_core::Result;

/// Comment operations over a repository trait object.
pub struct CommentService {
    repository: Arc<dyn CommentRepository>,
    admin_email: String,
}

impl CommentService {
    pub fn new(repository: Arc<dyn CommentRepository>, admin_email: impl Into<String>) -> Self {
        Self {
            repository,
            admin_email: admin_email.into(),
        }
    }

    /// Creates a comment with a fresh id and returns it.
    pub async fn create(&self, request: CreateCommentRequest) -> Result<Comment> {
        let comment = Comment::new(
            Uuid::new_v4(),
            request.text,
            request.username,
            request.post_id,
        );
        self.repository.insert(&comment).await?;
        tracing::info!(comment_id = %comment.id, post_id = %comment.post_id, "Created comment");
        Ok(comment)
    }

    /// Fetches a single comment.
    pub async fn read(&self, request: GetCommentRequest) -> Result<Comment> {
        self.repository.get(request.id).await
    }

    /// Lists all comments, newest first.
    pub async fn list_reversed(&self) -> Result<Vec<Comment>> {
        self.repository.list_by_date_reversed().await
    }

    /// Deletes a comment and dispatches a `comment.deleted` event carrying
    /// its final snapshot.
    pub async fn delete(&self, request: DeleteCommentRequest) -> Result<()> {
        let comment = self.repository.get(request.id).await?;
        self.repository.delete(comment.id).await?;
        let event = Event::comment_deleted(&comment);
        self.repository.dispatch_event(&event).await?;
        tracing::info!(comment_id = %comment.id, event_id = %event.id, "Deleted comment");
        Ok(())
    }

    /// Consumes a dispatched event and emails the administrator about the
    /// comment it carries.
    pub async fn notify(&self, event: Event) -> Result<()> {
        let comment = event.comment()?;
        self.repository
            .send_email(&self.admin_email, &comment, None)
            .await?;
        tracing::info!(event_id = %event.id, comment_id = %comment.id, "Notification sent");
        Ok(())
    }
}
