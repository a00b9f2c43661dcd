//! Storage abstraction: repository traits implemented by concrete backends.

mod traits;

pub use traits::{CommentRepository, PostRepository};
