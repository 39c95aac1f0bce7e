//! Email provider trait and error types

use crate::domain::{EmailMessage, EmailSendResult};
use async_trait::async_trait;
use thiserror::Error;

/// Email provider error types
#[derive(Error, Debug)]
pub enum EmailProviderError {
    #[error("Email provider not configured")]
    NotConfigured,

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Send failed: {0}")]
    SendFailed(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Trait for email providers
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailProvider: Send + Sync {
    /// Send an email message, one attempt
    async fn send(&self, message: &EmailMessage) -> Result<EmailSendResult, EmailProviderError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EmailAddress;

    #[tokio::test]
    async fn test_mock_email_provider() {
        let mut mock = MockEmailProvider::new();

        mock.expect_provider_name().returning(|| "mock");

        mock.expect_send()
            .withf(|msg| msg.to.email == "test@example.com")
            .returning(|_| Ok(EmailSendResult::success(Some("msg-123".to_string()))));

        assert_eq!(mock.provider_name(), "mock");

        let message = EmailMessage::new(
            EmailAddress::new("noreply@example.com"),
            EmailAddress::new("test@example.com"),
            "Test",
            "<p>Hello</p>",
        );
        let result = mock.send(&message).await.unwrap();
        assert_eq!(result.message_id.as_deref(), Some("msg-123"));
    }

    #[test]
    fn test_email_provider_error_display() {
        let errors = vec![
            EmailProviderError::NotConfigured,
            EmailProviderError::ConnectionError("timeout".to_string()),
            EmailProviderError::AuthenticationFailed("bad password".to_string()),
            EmailProviderError::SendFailed("recipient rejected".to_string()),
            EmailProviderError::InvalidAddress("no at sign".to_string()),
            EmailProviderError::InvalidConfiguration("missing host".to_string()),
        ];

        for err in errors {
            let msg = err.to_string();
            assert!(!msg.is_empty());
        }
    }
}
