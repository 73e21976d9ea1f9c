//! Key-value persistence seam.
//!
//! Both stores persist through [`KeyValueStorage`]: one JSON document per
//! logical key, the same shape a browser's local storage would hold. The
//! trait decouples the stores from the concrete backend (in-memory map for
//! tests, JSON files on disk for the CLI).

use crate::error::{FacilitaError, Result};
use std::collections::HashMap;
use std::sync::RwLock;
use strum::{AsRefStr, Display, EnumIter};

/// Logical keys under which the stores persist their state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
pub enum StorageKey {
    /// The session user record (one object or absent).
    #[strum(serialize = "facilita_user")]
    User,
    #[strum(serialize = "facilita_services")]
    Services,
    #[strum(serialize = "facilita_requests")]
    Requests,
    #[strum(serialize = "facilita_conversations")]
    Conversations,
    #[strum(serialize = "facilita_messages")]
    Messages,
    #[strum(serialize = "facilita_payments")]
    Payments,
    #[strum(serialize = "facilita_reviews")]
    Reviews,
}

/// A synchronous key-value backend holding raw JSON documents.
///
/// Implementations must be safe to share between the session store and the
/// data store through an `Arc`.
pub trait KeyValueStorage: Send + Sync {
    /// Returns the raw document stored under `key`, or `None` when absent.
    fn get(&self, key: StorageKey) -> Result<Option<String>>;

    /// Replaces the document stored under `key`.
    fn set(&self, key: StorageKey, value: &str) -> Result<()>;

    /// Removes the document stored under `key`. Removing an absent key is not an error.
    fn remove(&self, key: StorageKey) -> Result<()>;
}

/// Process-local storage backed by a map.
///
/// Nothing survives the process; used for tests and throwaway runs.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    entries: RwLock<HashMap<StorageKey, String>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently holding a document.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> FacilitaError {
    FacilitaError::internal("in-memory storage lock poisoned")
}

impl KeyValueStorage for InMemoryStorage {
    fn get(&self, key: StorageKey) -> Result<Option<String>> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(&key).cloned())
    }

    fn set(&self, key: StorageKey, value: &str) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: StorageKey) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.remove(&key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_key_names() {
        assert_eq!(StorageKey::User.as_ref(), "facilita_user");
        assert_eq!(StorageKey::Reviews.to_string(), "facilita_reviews");
        assert_eq!(StorageKey::iter().count(), 7);
    }

    #[test]
    fn test_in_memory_set_get_remove() {
        let storage = InMemoryStorage::new();
        assert!(storage.get(StorageKey::Requests).unwrap().is_none());

        storage.set(StorageKey::Requests, "[]").unwrap();
        assert_eq!(
            storage.get(StorageKey::Requests).unwrap().as_deref(),
            Some("[]")
        );
        assert_eq!(storage.len(), 1);

        storage.remove(StorageKey::Requests).unwrap();
        storage.remove(StorageKey::Requests).unwrap();
        assert!(storage.is_empty());
    }
}
