//! Blog domain: entities, request payloads, and events.

mod events;
mod requests;
mod types;

pub use events::{Event, EventName};
pub use requests::{
    CreateCommentRequest, CreatePostRequest, DeleteCommentRequest, GetCommentRequest,
    GetPostRequest, LikePostRequest, UpdateImageRequest,
};
pub use types::{Comment, Image, Post};
