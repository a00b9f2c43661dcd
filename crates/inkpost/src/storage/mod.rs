//! Storage backends implementing the repository traits.
//!
//! The in-memory backend is always available and is the default at runtime.
//! The AWS-backed implementation (DynamoDB tables, S3 images, SNS events,
//! SMTP email) is compiled in with the `dynamodb` feature.

pub mod inmemory;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

pub use inmemory::InMemoryStorage;

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbStorage;
