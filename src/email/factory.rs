//! Builds an [`EmailProvider`] from transport settings

use super::{EmailProvider, EmailProviderError, SmtpEmailProvider};
use crate::config::SmtpTransportConfig;

/// Factory for building an [`EmailProvider`] from configuration.
///
/// This indirection keeps unit tests hermetic (no SMTP server required).
#[cfg_attr(test, mockall::automock)]
pub trait EmailProviderFactory: Send + Sync {
    fn create(
        &self,
        config: &SmtpTransportConfig,
    ) -> Result<Box<dyn EmailProvider>, EmailProviderError>;
}

/// Default factory producing lettre SMTP providers
#[derive(Debug, Default, Clone, Copy)]
pub struct SmtpProviderFactory;

impl EmailProviderFactory for SmtpProviderFactory {
    fn create(
        &self,
        config: &SmtpTransportConfig,
    ) -> Result<Box<dyn EmailProvider>, EmailProviderError> {
        let provider = SmtpEmailProvider::from_config(config)?;
        Ok(Box::new(provider))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smtp_factory_creates_smtp_provider() {
        let config = SmtpTransportConfig {
            host: "localhost".to_string(),
            port: 1025,
            username: "user".to_string(),
            password: "pass".to_string(),
            use_auth: true,
            use_starttls: true,
        };

        let provider = SmtpProviderFactory.create(&config).unwrap();
        assert_eq!(provider.provider_name(), "smtp");
    }
}
