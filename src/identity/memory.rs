//! In-memory identity store for tests and the operator binary

use super::{IdentityStore, IdentityStoreError};
use crate::domain::IdentityRecord;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// Identity store backed by a map keyed on (realm, username)
#[derive(Debug, Default)]
pub struct InMemoryIdentityStore {
    identities: RwLock<HashMap<(String, String), IdentityRecord>>,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with records
    pub fn with_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = IdentityRecord>,
    {
        let store = Self::new();
        for record in records {
            store.insert(record);
        }
        store
    }

    /// Insert or replace a record
    pub fn insert(&self, record: IdentityRecord) {
        let key = (record.realm.clone(), record.username.clone());
        self.identities
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key, record);
    }
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn lookup(
        &self,
        username: &str,
        realm: &str,
    ) -> Result<IdentityRecord, IdentityStoreError> {
        let identities = self
            .identities
            .read()
            .map_err(|e| IdentityStoreError::Unavailable(e.to_string()))?;

        identities
            .get(&(realm.to_string(), username.to_string()))
            .cloned()
            .ok_or_else(|| IdentityStoreError::NotFound {
                username: username.to_string(),
                realm: realm.to_string(),
            })
    }
}
