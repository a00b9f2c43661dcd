//! Typed field extraction over untyped JSON maps.
//!
//! Inbound payloads (request bodies, path parameters, event payloads) arrive
//! as string-keyed `serde_json::Value` maps. The helpers here pull typed
//! fields out of such maps, collecting every failure into a [`FieldErrors`]
//! so a single response can describe all offending fields. Unknown fields
//! are rejected.
//!
//! Timestamps are accepted both as numeric seconds-since-epoch (the
//! persisted form) and as RFC 3339 strings.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::{Error, FieldErrors, Result};

/// Requires the value to be a JSON object.
pub fn object(value: &Value) -> Result<&Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| Error::validation("_schema", "expected a JSON object"))
}

/// Records an error for every field not in the allowed set.
pub fn check_unknown_fields(map: &Map<String, Value>, allowed: &[&str], errors: &mut FieldErrors) {
    for key in map.keys() {
        if !allowed.contains(&key.as_str()) {
            errors.push(key.clone(), "unknown field");
        }
    }
}

/// Required string field.
pub fn string_field(map: &Map<String, Value>, key: &str, errors: &mut FieldErrors) -> Option<String> {
    match map.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(key, "not a valid string");
            None
        }
        None => {
            errors.push(key, "missing required field");
            None
        }
    }
}

/// Required UUID field, represented as a string.
pub fn uuid_field(map: &Map<String, Value>, key: &str, errors: &mut FieldErrors) -> Option<Uuid> {
    match map.get(key) {
        Some(Value::String(s)) => match Uuid::parse_str(s) {
            Ok(id) => Some(id),
            Err(_) => {
                errors.push(key, "not a valid UUID");
                None
            }
        },
        Some(_) => {
            errors.push(key, "not a valid UUID");
            None
        }
        None => {
            errors.push(key, "missing required field");
            None
        }
    }
}

/// Optional boolean field with a default.
pub fn bool_field_or(
    map: &Map<String, Value>,
    key: &str,
    default: bool,
    errors: &mut FieldErrors,
) -> Option<bool> {
    match map.get(key) {
        Some(Value::Bool(b)) => Some(*b),
        Some(Value::Null) | None => Some(default),
        Some(_) => {
            errors.push(key, "not a valid boolean");
            None
        }
    }
}

/// Optional timestamp field, defaulting to the current time.
///
/// Accepts numeric seconds-since-epoch (integer or float, matching the
/// persisted form) or an RFC 3339 string.
pub fn datetime_field_or_now(
    map: &Map<String, Value>,
    key: &str,
    errors: &mut FieldErrors,
) -> Option<DateTime<Utc>> {
    match map.get(key) {
        Some(value) => parse_datetime(value).or_else(|| {
            errors.push(key, "not a valid timestamp");
            None
        }),
        None => Some(Utc::now()),
    }
}

fn parse_datetime(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => {
            let secs = if let Some(i) = n.as_i64() {
                i
            } else {
                n.as_f64()? as i64
            };
            DateTime::from_timestamp(secs, 0)
        }
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        _ => None,
    }
}

/// Converts collected errors into a result.
pub fn finish<T>(value: Option<T>, errors: FieldErrors) -> Result<T> {
    match value {
        Some(v) if errors.is_empty() => Ok(v),
        _ => Err(Error::Validation(errors)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_string_field_wrong_type_names_field() {
        let map = map(json!({"username": 3}));
        let mut errors = FieldErrors::new();
        assert!(string_field(&map, "username", &mut errors).is_none());
        assert_eq!(errors.get("username"), Some("not a valid string"));
    }

    #[test]
    fn test_string_field_missing() {
        let map = map(json!({}));
        let mut errors = FieldErrors::new();
        assert!(string_field(&map, "text", &mut errors).is_none());
        assert_eq!(errors.get("text"), Some("missing required field"));
    }

    #[test]
    fn test_uuid_field_parses() {
        let id = Uuid::new_v4();
        let map = map(json!({"id": id.to_string()}));
        let mut errors = FieldErrors::new();
        assert_eq!(uuid_field(&map, "id", &mut errors), Some(id));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_uuid_field_rejects_garbage() {
        let map = map(json!({"id": "not-a-uuid"}));
        let mut errors = FieldErrors::new();
        assert!(uuid_field(&map, "id", &mut errors).is_none());
        assert_eq!(errors.get("id"), Some("not a valid UUID"));
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let map = map(json!({"text": "hello", "bad_field": "bad_value"}));
        let mut errors = FieldErrors::new();
        check_unknown_fields(&map, &["text"], &mut errors);
        assert_eq!(errors.get("bad_field"), Some("unknown field"));
    }

    #[test]
    fn test_datetime_accepts_epoch_seconds() {
        let map = map(json!({"created_at": 1_700_000_000}));
        let mut errors = FieldErrors::new();
        let parsed = datetime_field_or_now(&map, "created_at", &mut errors).unwrap();
        assert_eq!(parsed.timestamp(), 1_700_000_000);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_datetime_accepts_float_epoch_seconds() {
        let map = map(json!({"created_at": 1_700_000_000.25}));
        let mut errors = FieldErrors::new();
        let parsed = datetime_field_or_now(&map, "created_at", &mut errors).unwrap();
        assert_eq!(parsed.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_datetime_accepts_rfc3339() {
        let map = map(json!({"created_at": "2024-01-15T10:30:00Z"}));
        let mut errors = FieldErrors::new();
        let parsed = datetime_field_or_now(&map, "created_at", &mut errors).unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-01-15T10:30:00+00:00");
    }

    #[test]
    fn test_datetime_defaults_to_now() {
        let map = map(json!({}));
        let mut errors = FieldErrors::new();
        let before = Utc::now();
        let parsed = datetime_field_or_now(&map, "created_at", &mut errors).unwrap();
        assert!(parsed >= before);
    }

    #[test]
    fn test_finish_collects_all_errors() {
        let map = map(json!({"text": 1, "username": 2}));
        let mut errors = FieldErrors::new();
        let text = string_field(&map, "text", &mut errors);
        let username = string_field(&map, "username", &mut errors);
        let result: Result<(String, String)> = finish(text.zip(username), errors);
        match result {
            Err(Error::Validation(errors)) => {
                assert!(errors.get("text").is_some());
                assert!(errors.get("username").is_some());
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
