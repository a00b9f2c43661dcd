//! AWS-backed storage: DynamoDB tables for records, S3 for images, SNS for
//! events, SMTP for notification email.

mod conversions;
mod error;
mod repository;

pub use repository::DynamoDbStorage;
