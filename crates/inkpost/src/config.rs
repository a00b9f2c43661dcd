use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// DynamoDB table holding posts (default: "posts")
    /// Note: Only used when the `dynamodb` feature is enabled.
    #[allow(dead_code)]
    pub posts_table: String,
    /// DynamoDB table holding comments (default: "comments")
    /// Note: Only used when the `dynamodb` feature is enabled.
    #[allow(dead_code)]
    pub comments_table: String,
    /// S3 bucket for uploaded post images (default: "inkpost-images")
    pub images_bucket: String,
    /// SNS topic ARN for domain events (default: "")
    /// Note: Only used when the `dynamodb` feature is enabled.
    #[allow(dead_code)]
    pub sns_topic_arn: String,
    /// Recipient for comment notification emails (default: "admin@inkpost.local")
    pub admin_email: String,
    /// Default sender address for outbound email (default: "no-reply@inkpost.local")
    /// Note: Only used when the `dynamodb` feature is enabled.
    #[allow(dead_code)]
    pub sender_email: String,
    /// SMTP relay host (default: "localhost")
    /// Note: Only used when the `dynamodb` feature is enabled.
    #[allow(dead_code)]
    pub smtp_host: String,
    /// SMTP username (default: "")
    /// Note: Only used when the `dynamodb` feature is enabled.
    #[allow(dead_code)]
    pub smtp_username: String,
    /// SMTP password (default: "")
    /// Note: Only used when the `dynamodb` feature is enabled.
    #[allow(dead_code)]
    pub smtp_password: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `POSTS_TABLE` - DynamoDB posts table (default: "posts")
    /// - `COMMENTS_TABLE` - DynamoDB comments table (default: "comments")
    /// - `IMAGES_BUCKET` - S3 bucket for post images (default: "inkpost-images")
    /// - `SNS_TOPIC_ARN` - topic ARN for domain events (default: "")
    /// - `ADMIN_EMAIL` - notification recipient (default: "admin@inkpost.local")
    /// - `SENDER_EMAIL` - default From address (default: "no-reply@inkpost.local")
    /// - `SMTP_HOST` - SMTP relay host (default: "localhost")
    /// - `SMTP_USERNAME` / `SMTP_PASSWORD` - relay credentials (default: empty)
    pub fn from_env() -> Self {
        Self {
            posts_table: env::var("POSTS_TABLE").unwrap_or_else(|_| "posts".to_string()),
            comments_table: env::var("COMMENTS_TABLE").unwrap_or_else(|_| "comments".to_string()),
            images_bucket: env::var("IMAGES_BUCKET")
                .unwrap_or_else(|_| "inkpost-images".to_string()),
            sns_topic_arn: env::var("SNS_TOPIC_ARN").unwrap_or_default(),
            admin_email: env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@inkpost.local".to_string()),
            sender_email: env::var("SENDER_EMAIL")
                .unwrap_or_else(|_| "no-reply@inkpost.local".to_string()),
            smtp_host: env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string()),
            smtp_username: env::var("SMTP_USERNAME").unwrap_or_default(),
            smtp_password: env::var("SMTP_PASSWORD").unwrap_or_default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
