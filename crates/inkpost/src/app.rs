use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        comments::{create_comment, delete_comment, get_comment, list_comments},
        health::health,
        notifications::notify,
        posts::{create_post, get_post, like_post, list_posts, update_post_image},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    // API routes with CORS
    let api_routes = Router::new()
        // Post routes
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/{id}", get(get_post))
        .route("/posts/{id}/like", post(like_post))
        .route("/posts/{id}/image", put(update_post_image))
        // Comment routes
        .route("/comments", get(list_comments).post(create_comment))
        .route("/comments/{id}", get(get_comment).delete(delete_comment))
        // Topic deliveries
        .route("/notifications", post(notify))
        .layer(cors);

    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use base64::prelude::{Engine, BASE64_STANDARD};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::services::{CommentService, PostService};
    use crate::storage::InMemoryStorage;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn test_state() -> (AppState, Arc<InMemoryStorage>) {
        let storage = Arc::new(InMemoryStorage::new("test-bucket"));
        let state = AppState {
            posts: Arc::new(PostService::new(storage.clone())),
            comments: Arc::new(CommentService::new(storage.clone(), "admin@inkpost.local")),
        };
        (state, storage)
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn response_json(response: axum::response::Response) -> Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (state, _) = test_state();
        let app = create_app(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_and_list_posts() {
        let (state, _) = test_state();
        let app = create_app(state);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/posts",
                json!({"text": "blog text", "username": "user test"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let post = response_json(response).await;
        assert_eq!(post["text"], "blog text");
        assert_eq!(post["likes"], 0);
        assert!(post.get("image").is_none());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/posts")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let posts = response_json(response).await;
        assert_eq!(posts.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_post_validation_names_field() {
        let (state, _) = test_state();
        let app = create_app(state);

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/posts",
                json!({"text": "blog text", "username": 3}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = response_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("username"));
    }

    #[tokio::test]
    async fn test_get_nonexistent_post() {
        let (state, _) = test_state();
        let app = create_app(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/posts/00000000-0000-0000-0000-000000000000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_like_post() {
        let (state, _) = test_state();
        let app = create_app(state);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/posts",
                json!({"text": "blog text", "username": "user test"}),
            ))
            .await
            .unwrap();
        let post = response_json(response).await;
        let post_id = post["id"].as_str().unwrap().to_string();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("/api/posts/{post_id}/like"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let liked = response_json(response).await;
        assert_eq!(liked["likes"], 1);
    }

    #[tokio::test]
    async fn test_update_post_image() {
        let (state, _) = test_state();
        let app = create_app(state);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/posts",
                json!({"text": "blog text", "username": "user test"}),
            ))
            .await
            .unwrap();
        let post = response_json(response).await;
        let post_id = post["id"].as_str().unwrap().to_string();

        let response = app
            .oneshot(json_request(
                "PUT",
                &format!("/api/posts/{post_id}/image"),
                json!({
                    "image": BASE64_STANDARD.encode(PNG_MAGIC),
                    "is_base64_encoded": true,
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let updated = response_json(response).await;
        assert_eq!(updated["image"]["id"], post_id);
        assert!(updated["image"]["url"]
            .as_str()
            .unwrap()
            .ends_with(&format!("posts/{post_id}.png")));
    }

    #[tokio::test]
    async fn test_update_post_image_rejects_non_image() {
        let (state, _) = test_state();
        let app = create_app(state);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/posts",
                json!({"text": "blog text", "username": "user test"}),
            ))
            .await
            .unwrap();
        let post = response_json(response).await;
        let post_id = post["id"].as_str().unwrap().to_string();

        let response = app
            .oneshot(json_request(
                "PUT",
                &format!("/api/posts/{post_id}/image"),
                json!({
                    "image": BASE64_STANDARD.encode(b"not an image"),
                    "is_base64_encoded": true,
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_comment_lifecycle() {
        let (state, storage) = test_state();
        let app = create_app(state);

        // Create
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/comments",
                json!({
                    "text": "testing comment",
                    "username": "user test",
                    "post_id": "550e8400-e29b-41d4-a716-446655440001",
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let comment = response_json(response).await;
        let comment_id = comment["id"].as_str().unwrap().to_string();

        // Read
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/api/comments/{comment_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Delete
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/comments/{comment_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        // Gone
        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/comments/{comment_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        // The deletion dispatched exactly one event
        let events = storage.dispatched_events().await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].comment().unwrap().id.to_string(), comment_id);
    }

    #[tokio::test]
    async fn test_notification_delivery_sends_email() {
        let (state, storage) = test_state();
        let app = create_app(state.clone());

        // Create and delete a comment to produce an event
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/comments",
                json!({
                    "text": "testing comment",
                    "username": "user test",
                    "post_id": "550e8400-e29b-41d4-a716-446655440001",
                }),
            ))
            .await
            .unwrap();
        let comment = response_json(response).await;
        let comment_id = comment["id"].as_str().unwrap().to_string();

        app.clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/comments/{comment_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        // Replay the dispatched event the way the topic subscription would
        let event = storage.dispatched_events().await.remove(0);
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/notifications",
                json!({ "Message": serde_json::to_string(&event).unwrap() }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let emails = storage.sent_emails().await;
        assert_eq!(emails.len(), 1);
        assert_eq!(emails[0].recipient, "admin@inkpost.local");
        assert_eq!(emails[0].comment.id.to_string(), comment_id);
    }

    #[tokio::test]
    async fn test_notification_rejects_missing_message() {
        let (state, _) = test_state();
        let app = create_app(state);

        let response = app
            .oneshot(json_request("POST", "/api/notifications", json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_default_state_wiring() {
        let config = Config {
            posts_table: "posts".to_string(),
            comments_table: "comments".to_string(),
            images_bucket: "test-bucket".to_string(),
            sns_topic_arn: String::new(),
            admin_email: "admin@inkpost.local".to_string(),
            sender_email: "no-reply@inkpost.local".to_string(),
            smtp_host: "localhost".to_string(),
            smtp_username: String::new(),
            smtp_password: String::new(),
        };
        let app = create_app(AppState::in_memory(&config));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/posts")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
