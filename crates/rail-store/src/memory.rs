use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::traits::{EntityStore, Record};

/// In-memory, `BTreeMap`-based entity store.
///
/// Intended for tests and embedding. Records are held behind a `RwLock` and
/// cloned on read/write. Data is lost when the store is dropped.
pub struct InMemoryEntityStore<T> {
    records: RwLock<BTreeMap<String, T>>,
}

impl<T: Record> InMemoryEntityStore<T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<T: Record> Default for InMemoryEntityStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> EntityStore<T> for InMemoryEntityStore<T> {
    fn get(&self, key: &str) -> StoreResult<Option<T>> {
        let map = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(map.get(key).cloned())
    }

    fn insert(&self, key: &str, record: &T) -> StoreResult<()> {
        if key.is_empty() {
            return Err(StoreError::EmptyKey);
        }
        let mut map = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        map.insert(key.to_string(), record.clone());
        Ok(())
    }

    fn values(&self) -> StoreResult<Vec<T>> {
        let map = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(map.values().cloned().collect())
    }

    fn len(&self) -> StoreResult<usize> {
        let map = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(map.len())
    }
}

impl<T> std::fmt::Debug for InMemoryEntityStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.records.read().map(|m| m.len()).unwrap_or_default();
        f.debug_struct("InMemoryEntityStore")
            .field("record_count", &count)
            .finish()
    }
}
