use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use inkpost_core::blog::{Comment, Event, Image, Post};
use inkpost_core::storage::{CommentRepository, PostRepository};
use inkpost_core::{Error, Result};

use crate::email;
use crate::media;

/// A notification email captured instead of sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub recipient: String,
    pub sender: Option<String>,
    pub subject: String,
    pub comment: Comment,
}

/// In-memory storage backend.
///
/// Backs both repositories with hash maps behind async locks. Dispatched
/// events and outbound emails are captured in-process so the full comment
/// lifecycle works without any external service.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    posts: RwLock<HashMap<Uuid, Post>>,
    comments: RwLock<HashMap<Uuid, Comment>>,
    events: RwLock<Vec<Event>>,
    emails: RwLock<Vec<SentEmail>>,
    images_bucket: String,
}

impl InMemoryStorage {
    pub fn new(images_bucket: impl Into<String>) -> Self {
        Self {
            images_bucket: images_bucket.into(),
            ..Self::default()
        }
    }

    /// Events dispatched so far, oldest first.
    pub async fn dispatched_events(&self) -> Vec<Event> {
        self.events.read().await.clone()
    }

    /// Emails captured so far, oldest first.
    pub async fn sent_emails(&self) -> Vec<SentEmail> {
        self.emails.read().await.clone()
    }
}

#[async_trait]
impl PostRepository for InMemoryStorage {
    async fn get(&self, id: Uuid) -> Result<Post> {
        let posts = self.posts.read().await;
        posts
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::not_found("Post", id.to_string()))
    }

    async fn list_by_date_reversed(&self) -> Result<Vec<Post>> {
        let posts = self.posts.read().await;
        let mut all: Vec<Post> = posts.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn insert(&self, post: &Post) -> Result<()> {
        let mut posts = self.posts.write().await;
        posts.insert(post.id, post.clone());
        Ok(())
    }

    async fn update(&self, post: &Post) -> Result<()> {
        let mut posts = self.posts.write().await;
        posts.insert(post.id, post.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut posts = self.posts.write().await;
        posts.remove(&id);
        Ok(())
    }

    async fn upload_image(&self, data: &[u8], key: Uuid) -> Result<Image> {
        let extension = media::detect_extension(data)?;
        Ok(Image {
            id: key,
            url: format!(
                "https://{}.s3.amazonaws.com/posts/{}.{}",
                self.images_bucket, key, extension
            ),
        })
    }
}

#[async_trait]
impl CommentRepository for InMemoryStorage {
    async fn get(&self, id: Uuid) -> Result<Comment> {
        let comments = self.comments.read().await;
        comments
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::not_found("Comment", id.to_string()))
    }

    async fn list_by_date_reversed(&self) -> Result<Vec<Comment>> {
        let comments = self.comments.read().await;
        let mut all: Vec<Comment> = comments.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn insert(&self, comment: &Comment) -> Result<()> {
        let mut comments = self.comments.write().await;
        comments.insert(comment.id, comment.clone());
        Ok(())
    }

    async fn update(&self, comment: &Comment) -> Result<()> {
        let mut comments = self.comments.write().await;
        comments.insert(comment.id, comment.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut comments = self.comments.write().await;
        comments.remove(&id);
        Ok(())
    }

    async fn dispatch_event(&self, event: &Event) -> Result<()> {
        tracing::debug!(event_id = %event.id, name = %event.name, "Dispatching event in-process");
        let mut events = self.events.write().await;
        events.push(event.clone());
        Ok(())
    }

    async fn send_email(
        &self,
        recipient: &str,
        comment: &Comment,
        sender: Option<&str>,
    ) -> Result<()> {
        tracing::debug!(comment_id = %comment.id, recipient, "Capturing email in-process");
        let (subject, _, _) = email::comment_email(comment);
        let mut emails = self.emails.write().await;
        emails.push(SentEmail {
            recipient: recipient.to_string(),
            sender: sender.map(str::to_string),
            subject,
            comment: comment.clone(),
        });
        Ok(())
    }
}
