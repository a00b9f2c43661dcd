use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::Value;

use inkpost_core::blog::Event;
use inkpost_core::Error;

use crate::{handlers::ApiError, state::AppState};

/// Consume a topic delivery (POST /api/notifications).
///
/// The body follows the SNS HTTPS-subscription shape: the event JSON is
/// carried as a string under `Message`.
pub async fn notify(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let message = body
        .get("Message")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::validation("Message", "missing required field"))?;
    let event_value: Value = serde_json::from_str(message)
        .map_err(|_| Error::validation("Message", "not valid JSON"))?;
    let event = Event::from_value(&event_value)?;

    state.comments.notify(event).await?;
    Ok(StatusCode::OK)
}
