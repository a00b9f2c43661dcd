//! AWS-backed repository implementation.
//!
//! Posts and comments live in their own DynamoDB tables keyed by `id`.
//! Images go to S3 with a public-read ACL, events are published on an SNS
//! topic, and notification email is sent through the SMTP mailer.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use aws_sdk_sns::types::MessageAttributeValue;
use uuid::Uuid;

use inkpost_core::blog::{Comment, Event, Image, Post};
use inkpost_core::storage::{CommentRepository, PostRepository};
use inkpost_core::{Error, Result};

use crate::config::Config;
use crate::email::Mailer;
use crate::media;

use super::conversions::{
    build_update_expression, comment_to_item, item_to_comment, item_to_post, post_to_item,
};
use super::error::{map_query_error, map_write_error};

/// Name of the GSI used for date-ordered listings on both tables.
const CREATED_AT_INDEX: &str = "created_at-index";

pub struct DynamoDbStorage {
    dynamodb: aws_sdk_dynamodb::Client,
    s3: aws_sdk_s3::Client,
    sns: aws_sdk_sns::Client,
    mailer: Mailer,
    posts_table: String,
    comments_table: String,
    images_bucket: String,
    sns_topic_arn: String,
}

impl DynamoDbStorage {
    /// Builds all AWS clients from the SDK default credential chain.
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Ok(Self {
            dynamodb: aws_sdk_dynamodb::Client::new(&aws_config),
            s3: aws_sdk_s3::Client::new(&aws_config),
            sns: aws_sdk_sns::Client::new(&aws_config),
            mailer: Mailer::new(config)?,
            posts_table: config.posts_table.clone(),
            comments_table: config.comments_table.clone(),
            images_bucket: config.images_bucket.clone(),
            sns_topic_arn: config.sns_topic_arn.clone(),
        })
    }

    async fn get_item(
        &self,
        table: &str,
        id: Uuid,
    ) -> Result<Option<std::collections::HashMap<String, AttributeValue>>> {
        let result = self
            .dynamodb
            .get_item()
            .table_name(table)
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(map_query_error)?;
        Ok(result.item)
    }

    /// Scans the whole date index. The tables are small by design; callers
    /// sort the materialized records newest first.
    async fn scan_all(
        &self,
        table: &str,
    ) -> Result<Vec<std::collections::HashMap<String, AttributeValue>>> {
        let result = self
            .dynamodb
            .scan()
            .table_name(table)
            .index_name(CREATED_AT_INDEX)
            .send()
            .await
            .map_err(map_query_error)?;
        Ok(result.items.unwrap_or_default())
    }

    async fn put_item(
        &self,
        table: &str,
        item: std::collections::HashMap<String, AttributeValue>,
        id: Uuid,
    ) -> Result<()> {
        self.dynamodb
            .put_item()
            .table_name(table)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| map_write_error(e, id.to_string()))?;
        Ok(())
    }

    async fn update_item(
        &self,
        table: &str,
        item: std::collections::HashMap<String, AttributeValue>,
        id: Uuid,
    ) -> Result<()> {
        // Nothing to update when the item carries only its key
        let Some(update) = build_update_expression(&item) else {
            return Ok(());
        };
        self.dynamodb
            .update_item()
            .table_name(table)
            .key("id", AttributeValue::S(id.to_string()))
            .update_expression(update.expression)
            .set_expression_attribute_names(Some(update.names))
            .set_expression_attribute_values(Some(update.values))
            .send()
            .await
            .map_err(|e| map_write_error(e, id.to_string()))?;
        Ok(())
    }

    async fn delete_item(&self, table: &str, id: Uuid) -> Result<()> {
        self.dynamodb
            .delete_item()
            .table_name(table)
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| map_write_error(e, id.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl PostRepository for DynamoDbStorage {
    async fn get(&self, id: Uuid) -> Result<Post> {
        match self.get_item(&self.posts_table, id).await? {
            Some(item) => item_to_post(&item),
            None => Err(Error::not_found("Post", id.to_string())),
        }
    }

    async fn list_by_date_reversed(&self) -> Result<Vec<Post>> {
        let items = self.scan_all(&self.posts_table).await?;
        let mut posts = items
            .iter()
            .map(item_to_post)
            .collect::<Result<Vec<Post>>>()?;
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn insert(&self, post: &Post) -> Result<()> {
        self.put_item(&self.posts_table, post_to_item(post), post.id)
            .await
    }

    async fn update(&self, post: &Post) -> Result<()> {
        self.update_item(&self.posts_table, post_to_item(post), post.id)
            .await
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.delete_item(&self.posts_table, id).await
    }

    async fn upload_image(&self, data: &[u8], key: Uuid) -> Result<Image> {
        let extension = media::detect_extension(data)?;
        let object_key = format!("posts/{key}.{extension}");

        self.s3
            .put_object()
            .bucket(&self.images_bucket)
            .key(&object_key)
            .acl(ObjectCannedAcl::PublicRead)
            .body(ByteStream::from(data.to_vec()))
            .send()
            .await
            .map_err(|e| map_write_error(e, key.to_string()))?;

        tracing::info!(%key, object_key, "Uploaded image to S3");

        Ok(Image {
            id: key,
            url: format!("https://{}.s3.amazonaws.com/{object_key}", self.images_bucket),
        })
    }
}

#[async_trait]
impl CommentRepository for DynamoDbStorage {
    async fn get(&self, id: Uuid) -> Result<Comment> {
        match self.get_item(&self.comments_table, id).await? {
            Some(item) => item_to_comment(&item),
            None => Err(Error::not_found("Comment", id.to_string())),
        }
    }

    async fn list_by_date_reversed(&self) -> Result<Vec<Comment>> {
        let items = self.scan_all(&self.comments_table).await?;
        let mut comments = items
            .iter()
            .map(item_to_comment)
            .collect::<Result<Vec<Comment>>>()?;
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(comments)
    }

    async fn insert(&self, comment: &Comment) -> Result<()> {
        self.put_item(&self.comments_table, comment_to_item(comment), comment.id)
            .await
    }

    async fn update(&self, comment: &Comment) -> Result<()> {
        self.update_item(&self.comments_table, comment_to_item(comment), comment.id)
            .await
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.delete_item(&self.comments_table, id).await
    }

    async fn dispatch_event(&self, event: &Event) -> Result<()> {
        let message = serde_json::to_string(event)
            .map_err(|e| Error::Repository(format!("failed to serialize event: {e}")))?;
        let action = MessageAttributeValue::builder()
            .data_type("String")
            .string_value(event.name.as_str())
            .build()
            .map_err(|e| Error::Repository(format!("failed to build message attribute: {e}")))?;

        self.sns
            .publish()
            .topic_arn(&self.sns_topic_arn)
            .message(message)
            .message_attributes("action", action)
            .send()
            .await
            .map_err(|e| map_write_error(e, event.id.clone()))?;

        tracing::info!(event_id = %event.id, name = %event.name, "Published event to SNS");
        Ok(())
    }

    async fn send_email(
        &self,
        recipient: &str,
        comment: &Comment,
        sender: Option<&str>,
    ) -> Result<()> {
        self.mailer
            .send_comment_notification(recipient, comment, sender)
            .await
            .map_err(|e| {
                tracing::error!(comment_id = %comment.id, error = %e, "Email delivery failed");
                Error::aws("EmailDeliveryFailed", comment.id.to_string())
            })
    }
}
