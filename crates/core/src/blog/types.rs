use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::validate;

/// An uploaded image attached to a post.
///
/// Owned by exactly one post; `id` always equals the owning post's id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub id: Uuid,
    /// Publicly addressable URL in the image bucket.
    pub url: String,
}

/// A blog post.
///
/// Immutable after construction from the caller's perspective; the service
/// layer produces updated copies via [`Post::set_image`] and
/// [`Post::increment_likes`] and persists them through partial updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub text: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    pub likes: u64,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Creates a new post with no image, zero likes, and `created_at = now`.
    pub fn new(id: Uuid, text: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            username: username.into(),
            image: None,
            likes: 0,
            created_at: Utc::now(),
        }
    }

    /// Constructs a post from already-parsed fields, enforcing the
    /// image/post id invariant.
    ///
    /// Every construction site goes through here, including repository
    /// reads, so a corrupted stored record surfaces as a validation
    /// failure rather than a stored lie.
    pub fn from_parts(
        id: Uuid,
        text: String,
        username: String,
        image: Option<Image>,
        likes: u64,
        created_at: DateTime<Utc>,
    ) -> Result<Self> {
        if let Some(image) = &image {
            if image.id != id {
                return Err(Error::validation(
                    "image",
                    "image and post should have the same id",
                ));
            }
        }
        Ok(Self {
            id,
            text,
            username,
            image,
            likes,
            created_at,
        })
    }

    /// Attaches an image, re-checking the id invariant.
    pub fn set_image(&mut self, image: Image) -> Result<()> {
        if image.id != self.id {
            return Err(Error::validation(
                "image",
                "image and post should have the same id",
            ));
        }
        self.image = Some(image);
        Ok(())
    }

    /// Increments the like counter by exactly one.
    pub fn increment_likes(&mut self) {
        self.likes += 1;
    }
}

/// A comment on a post. The `post_id` reference is not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub text: String,
    pub username: String,
    pub post_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a new comment with `created_at = now`.
    pub fn new(
        id: Uuid,
        text: impl Into<String>,
        username: impl Into<String>,
        post_id: Uuid,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            username: username.into(),
            post_id,
            created_at: Utc::now(),
        }
    }

    /// Validates an untyped map into a comment.
    ///
    /// Accepts `created_at` as numeric seconds-since-epoch (the form used
    /// in event payloads and storage records) or as an RFC 3339 string.
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = validate::object(value)?;
        let mut errors = crate::FieldErrors::new();
        validate::check_unknown_fields(
            map,
            &["id", "text", "username", "post_id", "created_at"],
            &mut errors,
        );
        let id = validate::uuid_field(map, "id", &mut errors);
        let text = validate::string_field(map, "text", &mut errors);
        let username = validate::string_field(map, "username", &mut errors);
        let post_id = validate::uuid_field(map, "post_id", &mut errors);
        let created_at = validate::datetime_field_or_now(map, "created_at", &mut errors);

        match (id, text, username, post_id, created_at) {
            (Some(id), Some(text), Some(username), Some(post_id), Some(created_at))
                if errors.is_empty() =>
            {
                Ok(Self {
                    id,
                    text,
                    username,
                    post_id,
                    created_at,
                })
            }
            _ => Err(Error::Validation(errors)),
        }
    }
}
