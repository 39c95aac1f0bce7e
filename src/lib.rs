//! OTP Mail Node - one-time passcode email delivery step
//!
//! This crate provides a single authentication tree node: it resolves the
//! user's email address, renders the message body (inline or fetched from a
//! URL) and delivers the one-time passcode over SMTP.

pub mod config;
pub mod content;
pub mod domain;
pub mod email;
pub mod error;
pub mod i18n;
pub mod identity;
pub mod node;
pub mod telemetry;

// Re-export commonly used types
pub use config::NodeConfig;
pub use domain::{SessionState, SharedState, StateKey};
pub use error::{FailureKind, NodeError, Result};
pub use node::{DeliveryPipeline, NodeFailure, Outcome};
