//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and
//! domain types. Timestamps are stored as numeric seconds-since-epoch; an
//! absent image is omitted from the item rather than stored as NULL.

use std::collections::{BTreeMap, HashMap};

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::DateTime;
use uuid::Uuid;

use inkpost_core::blog::{Comment, Image, Post};
use inkpost_core::{Error, Result};

/// Convert a Post to a DynamoDB item.
pub fn post_to_item(post: &Post) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();
    item.insert("id".to_string(), AttributeValue::S(post.id.to_string()));
    item.insert("text".to_string(), AttributeValue::S(post.text.clone()));
    item.insert(
        "username".to_string(),
        AttributeValue::S(post.username.clone()),
    );
    item.insert(
        "likes".to_string(),
        AttributeValue::N(post.likes.to_string()),
    );
    item.insert(
        "created_at".to_string(),
        AttributeValue::N(post.created_at.timestamp().to_string()),
    );
    if let Some(image) = &post.image {
        item.insert("image".to_string(), image_to_attribute(image));
    }
    item
}

/// Convert a DynamoDB item to a Post.
pub fn item_to_post(item: &HashMap<String, AttributeValue>) -> Result<Post> {
    let image = match item.get("image") {
        Some(attr) => Some(attribute_to_image(attr)?),
        None => None,
    };
    Post::from_parts(
        get_uuid(item, "id")?,
        get_string(item, "text")?,
        get_string(item, "username")?,
        image,
        get_u64(item, "likes")?,
        get_epoch(item, "created_at")?,
    )
}

/// Convert a Comment to a DynamoDB item.
pub fn comment_to_item(comment: &Comment) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();
    item.insert("id".to_string(), AttributeValue::S(comment.id.to_string()));
    item.insert("text".to_string(), AttributeValue::S(comment.text.clone()));
    item.insert(
        "username".to_string(),
        AttributeValue::S(comment.username.clone()),
    );
    item.insert(
        "post_id".to_string(),
        AttributeValue::S(comment.post_id.to_string()),
    );
    item.insert(
        "created_at".to_string(),
        AttributeValue::N(comment.created_at.timestamp().to_string()),
    );
    item
}

/// Convert a DynamoDB item to a Comment.
pub fn item_to_comment(item: &HashMap<String, AttributeValue>) -> Result<Comment> {
    Ok(Comment {
        id: get_uuid(item, "id")?,
        text: get_string(item, "text")?,
        username: get_string(item, "username")?,
        post_id: get_uuid(item, "post_id")?,
        created_at: get_epoch(item, "created_at")?,
    })
}

fn image_to_attribute(image: &Image) -> AttributeValue {
    let mut map = HashMap::new();
    map.insert("id".to_string(), AttributeValue::S(image.id.to_string()));
    map.insert("url".to_string(), AttributeValue::S(image.url.clone()));
    AttributeValue::M(map)
}

fn attribute_to_image(attr: &AttributeValue) -> Result<Image> {
    let map = attr
        .as_m()
        .map_err(|_| Error::Repository("invalid image attribute".to_string()))?;
    Ok(Image {
        id: get_uuid(map, "id")?,
        url: get_string(map, "url")?,
    })
}

/// A partial-update SET expression over every non-key attribute of an item.
///
/// Attribute names are aliased (`#k`) because some of ours, like `text`,
/// are DynamoDB reserved words. Returns `None` when the item carries only
/// its key.
pub struct UpdateExpression {
    pub expression: String,
    pub names: HashMap<String, String>,
    pub values: HashMap<String, AttributeValue>,
}

pub fn build_update_expression(
    item: &HashMap<String, AttributeValue>,
) -> Option<UpdateExpression> {
    // BTreeMap for a deterministic expression, which keeps this testable
    let fields: BTreeMap<&String, &AttributeValue> =
        item.iter().filter(|(key, _)| key.as_str() != "id").collect();
    if fields.is_empty() {
        return None;
    }

    let mut clauses = Vec::with_capacity(fields.len());
    let mut names = HashMap::new();
    let mut values = HashMap::new();
    for (key, value) in fields {
        clauses.push(format!("#{key} = :{key}"));
        names.insert(format!("#{key}"), key.clone());
        values.insert(format!(":{key}"), value.clone());
    }

    Some(UpdateExpression {
        expression: format!("SET {}", clauses.join(", ")),
        names,
        values,
    })
}

/// Get a required string attribute.
fn get_string(item: &HashMap<String, AttributeValue>, key: &str) -> Result<String> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| Error::Repository(format!("missing or invalid field: {key}")))
}

/// Get a required UUID attribute.
fn get_uuid(item: &HashMap<String, AttributeValue>, key: &str) -> Result<Uuid> {
    let s = get_string(item, key)?;
    Uuid::parse_str(&s).map_err(|e| Error::Repository(format!("invalid UUID {key}: {e}")))
}

/// Get a required non-negative number attribute.
fn get_u64(item: &HashMap<String, AttributeValue>, key: &str) -> Result<u64> {
    item.get(key)
        .and_then(|v| v.as_n().ok())
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| Error::Repository(format!("missing or invalid field: {key}")))
}

/// Get a required epoch-seconds timestamp attribute.
fn get_epoch(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<chrono::DateTime<chrono::Utc>> {
    let n = item
        .get(key)
        .and_then(|v| v.as_n().ok())
        .ok_or_else(|| Error::Repository(format!("missing or invalid field: {key}")))?;
    // Stored values may carry a fractional part; truncate to whole seconds
    let secs = n
        .parse::<i64>()
        .or_else(|_| n.parse::<f64>().map(|f| f as i64))
        .map_err(|e| Error::Repository(format!("invalid timestamp {key}: {e}")))?;
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| Error::Repository(format!("invalid timestamp {key}: out of range")))
}
