//! Email sending for the OTP mail node
//!
//! SMTP delivery through lettre behind the [`EmailProvider`] capability,
//! so hosts and tests can substitute their own sender.

pub mod factory;
pub mod provider;
pub mod smtp;
pub mod templates;

pub use factory::{EmailProviderFactory, SmtpProviderFactory};
pub use provider::{EmailProvider, EmailProviderError};
pub use smtp::SmtpEmailProvider;
pub use templates::TemplateEngine;

#[cfg(test)]
pub use factory::MockEmailProviderFactory;
#[cfg(test)]
pub use provider::MockEmailProvider;
