//! Email body sources
//!
//! The body is either the configured literal (`INLINE`) or a document
//! fetched over HTTP (`FILE_BASED`). Remote content is only fetched after a
//! short reachability probe succeeds; an unreachable document yields an
//! empty body rather than an error.

pub mod http;
pub mod source;

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

pub use http::HttpContentFetcher;
pub use source::ContentSource;

/// Content fetch error types
#[derive(Error, Debug)]
pub enum ContentSourceError {
    #[error("Invalid content URL: {0}")]
    InvalidUrl(String),

    #[error("Unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Transport error: {0}")]
    Transport(String),
}

/// Outcome of a reachability probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reachability {
    Reachable,
    Unreachable { reason: String },
}

impl Reachability {
    pub fn unreachable(reason: impl Into<String>) -> Self {
        Self::Unreachable {
            reason: reason.into(),
        }
    }

    pub fn is_reachable(&self) -> bool {
        matches!(self, Self::Reachable)
    }
}

impl fmt::Display for Reachability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reachable => f.write_str("reachable"),
            Self::Unreachable { reason } => write!(f, "unreachable ({})", reason),
        }
    }
}

/// HTTP reachability and fetch capability
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Lightweight existence check; never fails, errors become `Unreachable`
    async fn probe(&self, url: &str) -> Reachability;

    /// Fetch the whole document as text
    async fn fetch(&self, url: &str) -> Result<String, ContentSourceError>;
}

/// Join whitespace separated tokens with single spaces, keeping a trailing space
pub fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for token in text.split(is_token_separator).filter(|t| !t.is_empty()) {
        out.push_str(token);
        out.push(' ');
    }
    out
}

/// Separators between template tokens.
///
/// No-break spaces and NEL stay inside a token; the ASCII information
/// separators U+001C..=U+001F split tokens.
fn is_token_separator(c: char) -> bool {
    match c {
        '\u{a0}' | '\u{2007}' | '\u{202f}' | '\u{85}' => false,
        '\u{1c}'..='\u{1f}' => true,
        _ => c.is_whitespace(),
    }
}
