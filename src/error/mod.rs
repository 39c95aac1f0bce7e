//! Unified error handling for the OTP mail node

use crate::content::ContentSourceError;
use crate::email::EmailProviderError;
use crate::identity::IdentityStoreError;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Node-wide result type
pub type Result<T> = std::result::Result<T, NodeError>;

/// Failure kinds surfaced to the tree engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    IdentityLookup,
    EmailNotFound,
    OtpNotFound,
    ContentFetch,
    SendFailure,
}

impl FailureKind {
    /// Message catalog key holding the localized text for this kind
    pub fn message_key(&self) -> &'static str {
        match self {
            Self::IdentityLookup => "identity.failure",
            Self::EmailNotFound => "email.not.found",
            Self::OtpNotFound => "oneTimePassword.not.found",
            Self::ContentFetch => "content.fetch.failure",
            Self::SendFailure => "send.failure",
        }
    }

    /// Label used for logs and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IdentityLookup => "identity_lookup",
            Self::EmailNotFound => "email_not_found",
            Self::OtpNotFound => "otp_not_found",
            Self::ContentFetch => "content_fetch",
            Self::SendFailure => "send_failure",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Node error types
#[derive(Error, Debug)]
pub enum NodeError {
    #[error("Identity lookup failed: {0}")]
    IdentityLookup(#[source] IdentityStoreError),

    #[error("No email address in attribute '{attribute}' for user '{username}'")]
    EmailNotFound { username: String, attribute: String },

    #[error("One time password not found in shared state")]
    OtpNotFound,

    #[error("Email content fetch failed: {0}")]
    ContentFetch(#[from] ContentSourceError),

    #[error("Email send failed: {0}")]
    SendFailure(#[from] EmailProviderError),
}

impl NodeError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::IdentityLookup(_) => FailureKind::IdentityLookup,
            Self::EmailNotFound { .. } => FailureKind::EmailNotFound,
            Self::OtpNotFound => FailureKind::OtpNotFound,
            Self::ContentFetch(_) => FailureKind::ContentFetch,
            Self::SendFailure(_) => FailureKind::SendFailure,
        }
    }
}

impl From<IdentityStoreError> for NodeError {
    fn from(err: IdentityStoreError) -> Self {
        NodeError::IdentityLookup(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NodeError::EmailNotFound {
            username: "alice".to_string(),
            attribute: "mail".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No email address in attribute 'mail' for user 'alice'"
        );
    }

    #[test]
    fn test_error_kind_and_message_key() {
        let err: NodeError = EmailProviderError::AuthenticationFailed("535".to_string()).into();
        assert_eq!(err.kind(), FailureKind::SendFailure);
        assert_eq!(err.kind().message_key(), "send.failure");

        let err: NodeError = IdentityStoreError::NotFound {
            username: "bob".to_string(),
            realm: "/".to_string(),
        }
        .into();
        assert_eq!(err.kind(), FailureKind::IdentityLookup);
        assert_eq!(err.kind().message_key(), "identity.failure");

        assert_eq!(NodeError::OtpNotFound.kind().message_key(), "oneTimePassword.not.found");
    }

    #[test]
    fn test_error_source_is_preserved() {
        use std::error::Error as _;

        let err: NodeError = ContentSourceError::Transport("connection reset".to_string()).into();
        let source = err.source().expect("source");
        assert!(source.to_string().contains("connection reset"));
    }
}
