use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use crate::{entities::KeyValueStore, errors::LedgerError};

/// Process-local key-value store. With a quota, writes that would take the
/// total stored bytes past it are rejected, like a full browser storage.
#[derive(Default)]
pub struct InMemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: Mutex::default(),
            quota_bytes: Some(quota_bytes),
        }
    }

    fn lock(&self, key: &str) -> Result<MutexGuard<'_, HashMap<String, String>>, LedgerError> {
        self.entries
            .lock()
            .map_err(|_| LedgerError::persistence(key, &"store lock poisoned"))
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, LedgerError> {
        Ok(self.lock(key)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), LedgerError> {
        let mut entries = self.lock(key)?;
        if let Some(quota) = self.quota_bytes {
            let others: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > quota {
                return Err(LedgerError::persistence(
                    key,
                    &format!("quota exceeded ({} > {} bytes)", needed, quota),
                ));
            }
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), LedgerError> {
        self.lock(key)?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let store = InMemoryKeyValueStore::new();
        assert_eq!(store.get("theme").unwrap(), None);
        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
        store.remove("theme").unwrap();
        assert_eq!(store.get("theme").unwrap(), None);
    }

    #[test]
    fn quota_rejects_oversized_writes_and_keeps_old_value() {
        let store = InMemoryKeyValueStore::with_quota(12);
        store.set("theme", "dark").unwrap();
        let err = store.set("theme", "a-much-longer-value").unwrap_err();
        assert!(matches!(err, LedgerError::PersistenceFailure { .. }));
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
    }
}
