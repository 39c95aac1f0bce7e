//! Identity store capability and email address resolution

pub mod memory;
pub mod resolver;

use crate::domain::IdentityRecord;
use async_trait::async_trait;
use thiserror::Error;

pub use memory::InMemoryIdentityStore;
pub use resolver::AddressResolver;

/// Identity store error types
#[derive(Error, Debug)]
pub enum IdentityStoreError {
    #[error("Identity '{username}' not found in realm '{realm}'")]
    NotFound { username: String, realm: String },

    #[error("Invalid identity query: {0}")]
    InvalidQuery(String),

    #[error("Identity store unavailable: {0}")]
    Unavailable(String),
}

/// Directory lookup of user identities
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Look up the identity for (username, realm)
    async fn lookup(
        &self,
        username: &str,
        realm: &str,
    ) -> Result<IdentityRecord, IdentityStoreError>;
}
