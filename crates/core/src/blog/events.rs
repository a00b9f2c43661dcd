//! Domain events published on the notification topic.
//!
//! An [`Event`] is the wire shape: a name, a correlation id, and a JSON
//! payload string carrying the entity in its persisted form (numeric
//! seconds-since-epoch timestamps).

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::blog::Comment;
use crate::error::{Error, FieldErrors, Result};
use crate::validate;

/// Names of the events the service publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventName {
    #[serde(rename = "comment.created")]
    CommentCreated,
    #[serde(rename = "comment.deleted")]
    CommentDeleted,
}

impl EventName {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventName::CommentCreated => "comment.created",
            EventName::CommentDeleted => "comment.deleted",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "comment.created" => Some(EventName::CommentCreated),
            "comment.deleted" => Some(EventName::CommentDeleted),
            _ => None,
        }
    }
}

impl std::fmt::Display for EventName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A published domain event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub name: EventName,
    /// Entity snapshot serialized as a JSON string, persisted form.
    pub payload: String,
}

impl Event {
    /// Builds a `comment.deleted` event carrying the comment snapshot.
    pub fn comment_deleted(comment: &Comment) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: EventName::CommentDeleted,
            payload: json!({
                "id": comment.id.to_string(),
                "text": comment.text,
                "username": comment.username,
                "post_id": comment.post_id.to_string(),
                "created_at": comment.created_at.timestamp(),
            })
            .to_string(),
        }
    }

    /// Validates an untyped map into an event.
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = validate::object(value)?;
        let mut errors = FieldErrors::new();
        validate::check_unknown_fields(map, &["id", "name", "payload"], &mut errors);
        let id = validate::string_field(map, "id", &mut errors);
        let name = match validate::string_field(map, "name", &mut errors) {
            Some(raw) => match EventName::parse(&raw) {
                Some(name) => Some(name),
                None => {
                    errors.push("name", "unknown event name");
                    None
                }
            },
            None => None,
        };
        let payload = validate::string_field(map, "payload", &mut errors);
        match (id, name, payload) {
            (Some(id), Some(name), Some(payload)) if errors.is_empty() => {
                Ok(Self { id, name, payload })
            }
            _ => Err(Error::Validation(errors)),
        }
    }

    /// Parses the payload back into the comment it carries.
    pub fn comment(&self) -> Result<Comment> {
        let value: Value = serde_json::from_str(&self.payload)
            .map_err(|_| Error::validation("payload", "payload is not valid JSON"))?;
        Comment::from_value(&value)
    }
}
