use std::sync::Arc;

use uuid::Uuid;

use inkpost_core::blog::{
    CreatePostRequest, GetPostRequest, LikePostRequest, Post, UpdateImageRequest,
};
use inkpost_core::storage::PostRepository;
use inkpost_core::Result;

use crate::media;

/// Post operations over a repository trait object.
pub struct PostService {
    repository: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repository: Arc<dyn PostRepository>) -> Self {
        Self { repository }
    }

    /// Creates a post with a fresh id and returns it.
    pub async fn create(&self, request: CreatePostRequest) -> Result<Post> {
        let post = Post::new(Uuid::new_v4(), request.text, request.username);
        self.repository.insert(&post).await?;
        tracing::info!(post_id = %post.id, username = %post.username, "Created post");
        Ok(post)
    }

    /// Fetches a single post.
    pub async fn read(&self, request: GetPostRequest) -> Result<Post> {
        self.repository.get(request.id).await
    }

    /// Lists all posts, newest first.
    pub async fn list_reversed(&self) -> Result<Vec<Post>> {
        self.repository.list_by_date_reversed().await
    }

    /// Increments the like counter of a post.
    ///
    /// Read-modify-write without conditional guards: two concurrent likes
    /// can collapse into one. Returns the locally incremented copy rather
    /// than re-reading.
    pub async fn like(&self, request: LikePostRequest) -> Result<Post> {
        let mut post = self.repository.get(request.id).await?;
        post.increment_likes();
        self.repository.update(&post).await?;
        tracing::info!(post_id = %post.id, likes = post.likes, "Post liked");
        Ok(post)
    }

    /// Decodes and stores a post image, then returns the freshly re-read
    /// post carrying the image record.
    pub async fn update_logo(&self, request: UpdateImageRequest) -> Result<Post> {
        let data = media::decode_image_payload(&request.image, request.is_base64_encoded)?;
        let mut post = self.repository.get(request.post_id).await?;
        let image = self.repository.upload_image(&data, post.id).await?;
        post.set_image(image)?;
        self.repository.update(&post).await?;
        tracing::info!(post_id = %post.id, "Post image updated");
        self.repository.get(post.id).await
    }
}
