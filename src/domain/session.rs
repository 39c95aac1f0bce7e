//! Per-attempt shared state handed to the node by the tree engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Keys of the shared state this node reads or writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKey {
    Username,
    Realm,
    EmailAddress,
    OneTimePassword,
}

impl StateKey {
    /// Name of the key as it appears in the host's shared state
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Realm => "realm",
            Self::EmailAddress => "emailAddress",
            Self::OneTimePassword => "oneTimePassword",
        }
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shared state capability
///
/// Lets the pipeline run against any host store. Implementations must keep
/// a value once it has been set for the lifetime of the attempt.
pub trait SharedState {
    fn get(&self, key: StateKey) -> Option<&str>;

    fn set(&mut self, key: StateKey, value: String);

    fn has(&self, key: StateKey) -> bool {
        self.get(key).is_some()
    }
}

/// Typed session state for one authentication attempt
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realm: Option<String>,

    /// Populated lazily by the node, never re-resolved once set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,

    /// Written by the OTP generation step, read-only here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_time_password: Option<String>,
}

impl SessionState {
    pub fn new(username: impl Into<String>, realm: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            realm: Some(realm.into()),
            ..Default::default()
        }
    }

    pub fn with_email_address(mut self, email_address: impl Into<String>) -> Self {
        self.email_address = Some(email_address.into());
        self
    }

    pub fn with_one_time_password(mut self, otp: impl Into<String>) -> Self {
        self.one_time_password = Some(otp.into());
        self
    }

    fn slot(&self, key: StateKey) -> &Option<String> {
        match key {
            StateKey::Username => &self.username,
            StateKey::Realm => &self.realm,
            StateKey::EmailAddress => &self.email_address,
            StateKey::OneTimePassword => &self.one_time_password,
        }
    }

    fn slot_mut(&mut self, key: StateKey) -> &mut Option<String> {
        match key {
            StateKey::Username => &mut self.username,
            StateKey::Realm => &mut self.realm,
            StateKey::EmailAddress => &mut self.email_address,
            StateKey::OneTimePassword => &mut self.one_time_password,
        }
    }
}

impl SharedState for SessionState {
    fn get(&self, key: StateKey) -> Option<&str> {
        self.slot(key).as_deref()
    }

    fn set(&mut self, key: StateKey, value: String) {
        *self.slot_mut(key) = Some(value);
    }
}
