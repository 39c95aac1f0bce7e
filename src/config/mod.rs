//! Configuration for the OTP mail node
//!
//! The host supplies a validated [`NodeConfig`] once and reuses it for every
//! invocation. [`NodeConfig::from_env`] exists for the operator binary.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use validator::{Validate, ValidationError};

/// Attribute read from the identity when none is configured
pub const DEFAULT_EMAIL_ATTRIBUTE: &str = "mail";

/// Where the email body comes from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentSourceMode {
    /// `content_value` is the literal body
    #[default]
    Inline,
    /// `content_value` is a URL the body is fetched from
    FileBased,
}

impl FromStr for ContentSourceMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INLINE" => Ok(Self::Inline),
            "FILE_BASED" => Ok(Self::FileBased),
            other => anyhow::bail!("Unknown content source mode: {}", other),
        }
    }
}

impl fmt::Display for ContentSourceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inline => f.write_str("INLINE"),
            Self::FileBased => f.write_str("FILE_BASED"),
        }
    }
}

/// SMTP transport settings
///
/// Delivery always authenticates and upgrades with STARTTLS; the two flags
/// are carried so hosts can round-trip their stored settings.
#[derive(Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SmtpTransportConfig {
    /// SMTP server host
    #[validate(length(min = 1, max = 255))]
    pub host: String,

    /// SMTP server port (typically 587 for STARTTLS)
    #[serde(default = "default_smtp_port")]
    pub port: u16,

    #[validate(length(min = 1))]
    pub username: String,

    pub password: String,

    #[serde(default = "default_true")]
    pub use_auth: bool,

    #[serde(default = "default_true")]
    pub use_starttls: bool,
}

// Keeps the password out of logs
impl fmt::Debug for SmtpTransportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpTransportConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"***")
            .field("use_auth", &self.use_auth)
            .field("use_starttls", &self.use_starttls)
            .finish()
    }
}

/// Timeouts for the reachability probe of file based content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeConfig {
    #[serde(default = "default_probe_timeout_ms")]
    pub connect_timeout_ms: u64,
    #[serde(default = "default_probe_timeout_ms")]
    pub read_timeout_ms: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: default_probe_timeout_ms(),
            read_timeout_ms: default_probe_timeout_ms(),
        }
    }
}

impl ProbeConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

/// Per-node settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_content_source"))]
pub struct NodeConfig {
    #[validate(nested)]
    pub smtp: SmtpTransportConfig,

    /// Sender address
    #[validate(email)]
    pub from_email: String,

    /// Subject template, the catalog subject is used when unset
    #[serde(default)]
    pub subject: Option<String>,

    /// Identity attribute holding the email address
    #[serde(default = "default_email_attribute")]
    pub email_attribute: String,

    #[serde(default)]
    pub content_mode: ContentSourceMode,

    /// Literal body for `INLINE`, URL for `FILE_BASED`
    #[serde(default)]
    pub content_value: String,

    #[serde(default)]
    pub probe: ProbeConfig,
}

impl NodeConfig {
    /// The configured email attribute, `"mail"` when blank
    pub fn email_attribute(&self) -> &str {
        let attribute = self.email_attribute.trim();
        if attribute.is_empty() {
            DEFAULT_EMAIL_ATTRIBUTE
        } else {
            attribute
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            smtp: SmtpTransportConfig {
                host: lookup("OTP_SMTP_HOST").context("OTP_SMTP_HOST is required")?,
                port: lookup("OTP_SMTP_PORT")
                    .unwrap_or_else(|| default_smtp_port().to_string())
                    .parse()
                    .context("Invalid OTP_SMTP_PORT")?,
                username: lookup("OTP_SMTP_USERNAME").context("OTP_SMTP_USERNAME is required")?,
                password: lookup("OTP_SMTP_PASSWORD").context("OTP_SMTP_PASSWORD is required")?,
                use_auth: true,
                use_starttls: true,
            },
            from_email: lookup("OTP_FROM_EMAIL").context("OTP_FROM_EMAIL is required")?,
            subject: lookup("OTP_SUBJECT").filter(|s| !s.trim().is_empty()),
            email_attribute: lookup("OTP_EMAIL_ATTRIBUTE")
                .unwrap_or_else(default_email_attribute),
            content_mode: lookup("OTP_CONTENT_MODE")
                .map(|s| s.parse::<ContentSourceMode>())
                .transpose()
                .context("Invalid OTP_CONTENT_MODE")?
                .unwrap_or_default(),
            content_value: lookup("OTP_CONTENT_VALUE").unwrap_or_default(),
            probe: ProbeConfig {
                connect_timeout_ms: lookup("OTP_PROBE_CONNECT_TIMEOUT_MS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_probe_timeout_ms),
                read_timeout_ms: lookup("OTP_PROBE_READ_TIMEOUT_MS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_probe_timeout_ms),
            },
        })
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// "json" or "text"
    pub log_format: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

impl TelemetryConfig {
    pub fn from_env() -> Self {
        Self {
            log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string()),
        }
    }
}

/// A URL only has meaning in `FILE_BASED` mode, where it is mandatory
fn validate_content_source(config: &NodeConfig) -> std::result::Result<(), ValidationError> {
    if config.content_mode != ContentSourceMode::FileBased {
        return Ok(());
    }

    match url::Url::parse(config.content_value.trim()) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        _ => Err(ValidationError::new("invalid_content_url")),
    }
}

fn default_true() -> bool {
    true
}

fn default_smtp_port() -> u16 {
    587
}

fn default_probe_timeout_ms() -> u64 {
    1000
}

fn default_email_attribute() -> String {
    DEFAULT_EMAIL_ATTRIBUTE.to_string()
}
