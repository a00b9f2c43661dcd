//! Request payloads, one per operation.
//!
//! All of them are transient, constructed per invocation from untyped JSON
//! (body or path parameters) through the validation helpers, and fully
//! validated before any service logic runs.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::{Error, FieldErrors, Result};
use crate::validate;

/// Payload for creating a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub text: String,
    pub username: String,
}

impl CreatePostRequest {
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = validate::object(value)?;
        let mut errors = FieldErrors::new();
        validate::check_unknown_fields(map, &["text", "username"], &mut errors);
        let text = validate::string_field(map, "text", &mut errors);
        let username = validate::string_field(map, "username", &mut errors);
        match (text, username) {
            (Some(text), Some(username)) if errors.is_empty() => Ok(Self { text, username }),
            _ => Err(Error::Validation(errors)),
        }
    }
}

/// Point lookup of a post by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetPostRequest {
    pub id: Uuid,
}

impl GetPostRequest {
    pub fn from_value(value: &Value) -> Result<Self> {
        Ok(Self {
            id: id_from_value(value)?,
        })
    }

    /// Validates a raw path parameter.
    pub fn from_path(raw: &str) -> Result<Self> {
        Self::from_value(&json!({ "id": raw }))
    }
}

/// Like a post by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikePostRequest {
    pub id: Uuid,
}

impl LikePostRequest {
    pub fn from_path(raw: &str) -> Result<Self> {
        Ok(Self {
            id: id_from_value(&json!({ "id": raw }))?,
        })
    }
}

/// Payload for attaching an image to a post.
///
/// `image` carries either the whole body base64-encoded
/// (`is_base64_encoded = true`) or a data-URL style string containing a
/// `base64,` marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateImageRequest {
    pub post_id: Uuid,
    pub image: String,
    pub is_base64_encoded: bool,
}

impl UpdateImageRequest {
    pub fn from_parts(raw_post_id: &str, body: &Value) -> Result<Self> {
        let map = validate::object(body)?;
        let mut errors = FieldErrors::new();
        validate::check_unknown_fields(map, &["image", "is_base64_encoded"], &mut errors);
        let image = validate::string_field(map, "image", &mut errors);
        let is_base64_encoded = validate::bool_field_or(map, "is_base64_encoded", false, &mut errors);
        let post_id = match Uuid::parse_str(raw_post_id) {
            Ok(id) => Some(id),
            Err(_) => {
                errors.push("id", "not a valid UUID");
                None
            }
        };
        match (post_id, image, is_base64_encoded) {
            (Some(post_id), Some(image), Some(is_base64_encoded)) if errors.is_empty() => {
                Ok(Self {
                    post_id,
                    image,
                    is_base64_encoded,
                })
            }
            _ => Err(Error::Validation(errors)),
        }
    }
}

/// Payload for creating a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub text: String,
    pub username: String,
    pub post_id: Uuid,
}

impl CreateCommentRequest {
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = validate::object(value)?;
        let mut errors = FieldErrors::new();
        validate::check_unknown_fields(map, &["text", "username", "post_id"], &mut errors);
        let text = validate::string_field(map, "text", &mut errors);
        let username = validate::string_field(map, "username", &mut errors);
        let post_id = validate::uuid_field(map, "post_id", &mut errors);
        match (text, username, post_id) {
            (Some(text), Some(username), Some(post_id)) if errors.is_empty() => Ok(Self {
                text,
                username,
                post_id,
            }),
            _ => Err(Error::Validation(errors)),
        }
    }
}

/// Point lookup of a comment by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetCommentRequest {
    pub id: Uuid,
}

impl GetCommentRequest {
    pub fn from_path(raw: &str) -> Result<Self> {
        Ok(Self {
            id: id_from_value(&json!({ "id": raw }))?,
        })
    }
}

/// Delete a comment by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteCommentRequest {
    pub id: Uuid,
}

impl DeleteCommentRequest {
    pub fn from_path(raw: &str) -> Result<Self> {
        Ok(Self {
            id: id_from_value(&json!({ "id": raw }))?,
        })
    }
}

/// Shared `{id}` path-parameter validation.
fn id_from_value(value: &Value) -> Result<Uuid> {
    let map = validate::object(value)?;
    let mut errors = FieldErrors::new();
    validate::check_unknown_fields(map, &["id"], &mut errors);
    let id = validate::uuid_field(map, "id", &mut errors);
    validate::finish(id, errors)
}
