//! Comment notification email content, plus the SMTP mailer used by the
//! AWS-backed storage.

use inkpost_core::blog::Comment;

/// Builds the subject, plain-text body, and HTML body for a comment
/// notification email.
pub fn comment_email(comment: &Comment) -> (String, String, String) {
    let subject = format!("A comment by {} was removed", comment.username);
    let text = format!(
        "The following comment was removed from post {}:\n\n\
        \"{}\"\n\n\
        Written by {} at {}.",
        comment.post_id,
        comment.text,
        comment.username,
        comment.created_at.to_rfc3339(),
    );
    let html = format!(
        r#"<!DOCTYPE html>
<html>
<body style="font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; padding: 20px; color: #333;">
    <h2>Comment removed</h2>
    <p>The following comment was removed from post <code>{}</code>:</p>
    <blockquote>{}</blockquote>
    <p style="color: #666; font-size: 14px;">Written by <strong>{}</strong> at {}.</p>
</body>
</html>"#,
        comment.post_id,
        comment.text,
        comment.username,
        comment.created_at.to_rfc3339(),
    );
    (subject, text, html)
}

#[cfg(feature = "dynamodb")]
pub use smtp::Mailer;

#[cfg(feature = "dynamodb")]
mod smtp {
    use anyhow::{Context, Result};
    use lettre::message::{header, Mailbox, Message, MultiPart, SinglePart};
    use lettre::transport::smtp::authentication::Credentials;
    use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};

    use inkpost_core::blog::Comment;

    use crate::config::Config;

    /// Async SMTP transport wrapper.
    #[derive(Clone)]
    pub struct Mailer {
        transport: AsyncSmtpTransport<Tokio1Executor>,
        default_sender: String,
    }

    impl Mailer {
        /// Builds the mailer from the SMTP section of the configuration.
        pub fn new(config: &Config) -> Result<Self> {
            let mut builder = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
                .context("failed to configure SMTP transport")?;
            if !config.smtp_username.is_empty() {
                builder = builder.credentials(Credentials::new(
                    config.smtp_username.clone(),
                    config.smtp_password.clone(),
                ));
            }
            Ok(Self {
                transport: builder.build(),
                default_sender: config.sender_email.clone(),
            })
        }

        /// Sends a comment notification, falling back to the configured
        /// default sender when `sender` is `None`.
        pub async fn send_comment_notification(
            &self,
            recipient: &str,
            comment: &Comment,
            sender: Option<&str>,
        ) -> Result<()> {
            let from = sender
                .unwrap_or(&self.default_sender)
                .parse::<Mailbox>()
                .context("invalid sender email address")?;
            let to = recipient
                .parse::<Mailbox>()
                .context("invalid recipient email address")?;

            let (subject, text, html) = super::comment_email(comment);
            let email = Message::builder()
                .from(from)
                .to(to)
                .subject(subject)
                .multipart(
                    MultiPart::alternative()
                        .singlepart(
                            SinglePart::builder()
                                .header(header::ContentType::TEXT_PLAIN)
                                .body(text),
                        )
                        .singlepart(
                            SinglePart::builder()
                                .header(header::ContentType::TEXT_HTML)
                                .body(html),
                        ),
                )
                .context("failed to build email message")?;

            self.transport
                .send(email)
                .await
                .context("failed to send email")?;
            tracing::info!(comment_id = %comment.id, recipient, "Notification email sent");
            Ok(())
        }
    }
}
