//! SMTP email provider implementation using lettre

use super::provider::{EmailProvider, EmailProviderError};
use crate::config::SmtpTransportConfig;
use crate::domain::{EmailAddress, EmailMessage, EmailSendResult};
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

/// SMTP provider with authenticated STARTTLS transport
pub struct SmtpEmailProvider {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpEmailProvider {
    /// Create a new SMTP provider from transport settings
    ///
    /// Authentication and STARTTLS are always on, whatever the flags say.
    pub fn from_config(config: &SmtpTransportConfig) -> Result<Self, EmailProviderError> {
        if config.host.trim().is_empty() {
            return Err(EmailProviderError::NotConfigured);
        }

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| EmailProviderError::InvalidConfiguration(e.to_string()))?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self { transport })
    }

    fn build_message(message: &EmailMessage) -> Result<Message, EmailProviderError> {
        let from = parse_mailbox(&message.from, "from")?;
        let to = parse_mailbox(&message.to, "to")?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(&message.subject)
            .date_now()
            .header(ContentType::TEXT_HTML)
            .body(message.html_body.clone())
            .map_err(|e| EmailProviderError::SendFailed(e.to_string()))
    }
}

fn parse_mailbox(address: &EmailAddress, role: &str) -> Result<Mailbox, EmailProviderError> {
    address
        .to_mailbox_string()
        .parse()
        .map_err(|e| EmailProviderError::InvalidAddress(format!("Invalid {} address: {}", role, e)))
}

fn classify_transport_error(error_msg: String) -> EmailProviderError {
    if error_msg.contains("authentication") || error_msg.contains("AUTH") {
        EmailProviderError::AuthenticationFailed(error_msg)
    } else if error_msg.contains("connection") || error_msg.contains("timeout") {
        EmailProviderError::ConnectionError(error_msg)
    } else {
        EmailProviderError::SendFailed(error_msg)
    }
}

#[async_trait]
impl EmailProvider for SmtpEmailProvider {
    async fn send(&self, message: &EmailMessage) -> Result<EmailSendResult, EmailProviderError> {
        let email = Self::build_message(message)?;

        match self.transport.send(email).await {
            Ok(response) => {
                let message_id = response.message().next().map(|s| s.to_string());
                Ok(EmailSendResult::success(message_id))
            }
            Err(e) => Err(classify_transport_error(e.to_string())),
        }
    }

    fn provider_name(&self) -> &'static str {
        "smtp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_smtp_config() -> SmtpTransportConfig {
        SmtpTransportConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            username: "mailer@example.com".to_string(),
            password: "password".to_string(),
            use_auth: true,
            use_starttls: true,
        }
    }

    fn test_message(to: &str) -> EmailMessage {
        EmailMessage::new(
            EmailAddress::new("noreply@example.com"),
            EmailAddress::new(to),
            "Your one time passcode",
            "Your code: \n \n Your one time passcode is: 482913",
        )
    }

    #[test]
    fn test_smtp_provider_creation() {
        let provider = SmtpEmailProvider::from_config(&test_smtp_config()).unwrap();
        assert_eq!(provider.provider_name(), "smtp");
    }

    #[test]
    fn test_smtp_provider_requires_host() {
        let config = SmtpTransportConfig {
            host: " ".to_string(),
            ..test_smtp_config()
        };
        assert!(matches!(
            SmtpEmailProvider::from_config(&config),
            Err(EmailProviderError::NotConfigured)
        ));
    }

    #[test]
    fn test_build_message_is_html() {
        let email = SmtpEmailProvider::build_message(&test_message("alice@example.com")).unwrap();
        let formatted = String::from_utf8(email.formatted()).unwrap();

        assert!(formatted.contains("Content-Type: text/html"));
        assert!(formatted.contains("To: alice@example.com"));
        assert!(formatted.contains("Date: "));
    }

    #[test]
    fn test_build_message_invalid_recipient() {
        let result = SmtpEmailProvider::build_message(&test_message("not an address"));
        assert!(matches!(result, Err(EmailProviderError::InvalidAddress(_))));
    }

    #[test]
    fn test_classify_transport_error() {
        assert!(matches!(
            classify_transport_error("permanent error (535): authentication failed".to_string()),
            EmailProviderError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            classify_transport_error("connection refused".to_string()),
            EmailProviderError::ConnectionError(_)
        ));
        assert!(matches!(
            classify_transport_error("permanent error (550): mailbox unavailable".to_string()),
            EmailProviderError::SendFailed(_)
        ));
    }
}
