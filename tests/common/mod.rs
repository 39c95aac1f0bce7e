//! Common test utilities

use async_trait::async_trait;
use otp_mail_node::config::{ContentSourceMode, NodeConfig, ProbeConfig, SmtpTransportConfig};
use otp_mail_node::domain::{EmailMessage, EmailSendResult};
use otp_mail_node::email::{EmailProvider, EmailProviderError, EmailProviderFactory};
use std::sync::{Arc, Mutex};

pub fn test_config(mode: ContentSourceMode, value: &str) -> NodeConfig {
    NodeConfig {
        smtp: SmtpTransportConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            username: "mailer@example.com".to_string(),
            password: "secret".to_string(),
            use_auth: true,
            use_starttls: true,
        },
        from_email: "noreply@example.com".to_string(),
        subject: None,
        email_attribute: "mail".to_string(),
        content_mode: mode,
        content_value: value.to_string(),
        probe: ProbeConfig {
            connect_timeout_ms: 200,
            read_timeout_ms: 200,
        },
    }
}

/// What the recording provider does when asked to send
#[derive(Clone)]
pub enum SendBehavior {
    Accept,
    RejectAuth,
}

/// Email provider factory that records messages instead of talking SMTP
#[derive(Clone)]
pub struct RecordingFactory {
    pub sent: Arc<Mutex<Vec<EmailMessage>>>,
    pub created: Arc<Mutex<usize>>,
    behavior: SendBehavior,
}

impl RecordingFactory {
    pub fn new(behavior: SendBehavior) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            created: Arc::new(Mutex::new(0)),
            behavior,
        }
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn providers_created(&self) -> usize {
        *self.created.lock().unwrap()
    }
}

struct RecordingProvider {
    sent: Arc<Mutex<Vec<EmailMessage>>>,
    behavior: SendBehavior,
}

#[async_trait]
impl EmailProvider for RecordingProvider {
    async fn send(&self, message: &EmailMessage) -> Result<EmailSendResult, EmailProviderError> {
        match self.behavior {
            SendBehavior::Accept => {
                self.sent.lock().unwrap().push(message.clone());
                Ok(EmailSendResult::success(Some("msg-1".to_string())))
            }
            SendBehavior::RejectAuth => Err(EmailProviderError::AuthenticationFailed(
                "535 5.7.8 Authentication credentials invalid".to_string(),
            )),
        }
    }

    fn provider_name(&self) -> &'static str {
        "recording"
    }
}

impl EmailProviderFactory for RecordingFactory {
    fn create(
        &self,
        _config: &SmtpTransportConfig,
    ) -> Result<Box<dyn EmailProvider>, EmailProviderError> {
        *self.created.lock().unwrap() += 1;
        Ok(Box::new(RecordingProvider {
            sent: self.sent.clone(),
            behavior: self.behavior.clone(),
        }))
    }
}
