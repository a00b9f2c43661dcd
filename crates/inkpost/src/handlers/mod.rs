pub mod comments;
pub mod error;
pub mod health;
pub mod notifications;
pub mod posts;

pub use error::ApiError;
