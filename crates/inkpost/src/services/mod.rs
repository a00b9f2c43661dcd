//! Service layer: one service per aggregate, wrapping a repository trait
//! object.

mod comments;
mod posts;

pub use comments::CommentService;
pub use posts::PostService;
