//! Email address resolution from an identity attribute

use super::IdentityStore;
use crate::error::{NodeError, Result};
use std::sync::Arc;

/// Resolves a user's email address from the configured identity attribute
pub struct AddressResolver {
    store: Arc<dyn IdentityStore>,
    attribute: String,
}

impl AddressResolver {
    pub fn new(store: Arc<dyn IdentityStore>, attribute: impl Into<String>) -> Self {
        Self {
            store,
            attribute: attribute.into(),
        }
    }

    /// Look up (username, realm) and return the first value of the email
    /// attribute, in the order the store returned them.
    ///
    /// Has no side effects; persisting the address is the caller's job.
    pub async fn resolve(&self, username: &str, realm: &str) -> Result<String> {
        let identity = self.store.lookup(username, realm).await.map_err(|e| {
            tracing::warn!(
                username = %username,
                realm = %realm,
                error = %e,
                "Identity lookup failure"
            );
            NodeError::IdentityLookup(e)
        })?;

        tracing::debug!(attribute = %self.attribute, "Using email attribute");

        match identity
            .attribute(&self.attribute)
            .and_then(|values| values.first())
        {
            Some(email) => {
                tracing::debug!(username = %username, email = %email, "Email address found");
                Ok(email.clone())
            }
            None => {
                tracing::warn!(username = %username, attribute = %self.attribute, "Email not found");
                Err(NodeError::EmailNotFound {
                    username: username.to_string(),
                    attribute: self.attribute.clone(),
                })
            }
        }
    }
}
