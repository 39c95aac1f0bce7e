//! Identity record domain types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A directory-backed user identity, keyed by (username, realm)
///
/// Attribute values keep the order the backing store returned them in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub username: String,
    pub realm: String,
    #[serde(default)]
    pub attributes: HashMap<String, Vec<String>>,
}

impl IdentityRecord {
    pub fn new(username: impl Into<String>, realm: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            realm: realm.into(),
            attributes: HashMap::new(),
        }
    }

    /// Add an attribute with its values (builder style)
    pub fn with_attribute<I, V>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.attributes
            .insert(name.into(), values.into_iter().map(Into::into).collect());
        self
    }

    /// Values of an attribute, `None` when the identity does not carry it
    pub fn attribute(&self, name: &str) -> Option<&[String]> {
        self.attributes.get(name).map(Vec::as_slice)
    }
}
