//! One persisted entity family.

use crate::error::FacilitaError;
use crate::storage::{KeyValueStorage, StorageKey};
use serde::{Serialize, de::DeserializeOwned};

/// An ordered collection bound to the storage key it persists under.
#[derive(Debug, Clone)]
pub(crate) struct Collection<T> {
    key: StorageKey,
    items: Vec<T>,
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Loads the family stored under `key`.
    ///
    /// Absent, unreadable or corrupt documents fall back to `default()`;
    /// corruption is logged and otherwise treated like an empty store.
    pub(crate) fn load(
        storage: &dyn KeyValueStorage,
        key: StorageKey,
        default: impl FnOnce() -> Vec<T>,
    ) -> Self {
        let items = match storage.get(key) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<T>>(&raw) {
                Ok(items) => {
                    tracing::debug!("Loaded {} entries from {}", items.len(), key);
                    items
                }
                Err(e) => {
                    tracing::warn!("Discarding corrupt data under {}: {}", key, e);
                    default()
                }
            },
            Ok(None) => default(),
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", key, e);
                default()
            }
        };
        Self { key, items }
    }

    /// Writes the whole family back. Failures are logged, never propagated:
    /// the in-memory copy stays authoritative and the next write retries it.
    pub(crate) fn persist(&self, storage: &dyn KeyValueStorage) {
        let result = serde_json::to_string(&self.items)
            .map_err(FacilitaError::from)
            .and_then(|json| storage.set(self.key, &json));
        if let Err(e) = result {
            tracing::warn!("Failed to persist {}: {}", self.key, e);
        }
    }

    pub(crate) fn items(&self) -> &[T] {
        &self.items
    }

    pub(crate) fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub(crate) fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<&T> {
        self.items.iter().find(|item| predicate(item))
    }

    pub(crate) fn find_mut(&mut self, predicate: impl Fn(&T) -> bool) -> Option<&mut T> {
        self.items.iter_mut().find(|item| predicate(item))
    }

    pub(crate) fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<&T> {
        self.items.iter().filter(|item| predicate(item)).collect()
    }
}
