use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreResult;

/// Anything that can live in an [`EntityStore`].
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {}

impl<T> Record for T where T: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {}

/// A durable mapping from string keys to records of one kind.
///
/// All implementations must satisfy these invariants:
/// - `get` after a successful `insert` under the same key returns the
///   inserted record.
/// - `values` returns every record exactly once, ordered by key.
/// - A failed `insert` leaves the store unchanged.
pub trait EntityStore<T: Record>: Send + Sync {
    /// Read a record by key. Returns `Ok(None)` if the key is absent.
    fn get(&self, key: &str) -> StoreResult<Option<T>>;

    /// Insert or replace the record stored under `key`.
    fn insert(&self, key: &str, record: &T) -> StoreResult<()>;

    /// All records, ordered by key.
    fn values(&self) -> StoreResult<Vec<T>>;

    /// Number of records.
    fn len(&self) -> StoreResult<usize>;

    /// Returns `true` if the store holds no records.
    fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Records matching `predicate`, in key order.
    ///
    /// Default implementation filters `values()`. Backends with secondary
    /// indexes may override.
    fn filter(&self, predicate: &dyn Fn(&T) -> bool) -> StoreResult<Vec<T>> {
        Ok(self
            .values()?
            .into_iter()
            .filter(|record| predicate(record))
            .collect())
    }
}
