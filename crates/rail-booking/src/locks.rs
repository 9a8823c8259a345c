use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{BookingError, BookingResult};

/// Per-train mutual exclusion.
///
/// Every read-check-write on a train record (booking a seat, replacing the
/// schedule) runs while holding that train's lock, so two bookings can never
/// both observe the last empty seat. Operations on different trains do not
/// contend.
#[derive(Debug, Default)]
pub struct TrainLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl TrainLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// The lock handle for `train_id`, created on first use.
    ///
    /// Callers should only ask for ids of trains known to exist, since the
    /// table keeps one entry per id ever requested.
    pub fn handle(&self, train_id: &str) -> BookingResult<Arc<Mutex<()>>> {
        let mut table = self
            .locks
            .lock()
            .map_err(|_| BookingError::failed("lock train", "lock table poisoned"))?;
        Ok(Arc::clone(
            table.entry(train_id.to_string()).or_default(),
        ))
    }

    /// Number of trains that currently have a lock entry.
    pub fn len(&self) -> usize {
        self.locks.lock().map(|t| t.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Acquire a train lock handle, converting poisoning into the operation's
/// generic failure.
pub(crate) fn acquire<'a>(
    handle: &'a Mutex<()>,
    operation: &'static str,
) -> BookingResult<MutexGuard<'a, ()>> {
    handle
        .lock()
        .map_err(|_| BookingError::failed(operation, "train lock poisoned"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_train_shares_a_handle() {
        let locks = TrainLocks::new();
        let a = locks.handle("t1").unwrap();
        let b = locks.handle("t1").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(locks.len(), 1);
    }

    #[test]
    fn different_trains_get_different_handles() {
        let locks = TrainLocks::new();
        let a = locks.handle("t1").unwrap();
        let b = locks.handle("t2").unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        let _ga = acquire(&a, "test").unwrap();
        // Holding t1 does not block t2.
        let _gb = b.try_lock().expect("t2 should be free");
    }

    #[test]
    fn held_lock_blocks_same_train() {
        let locks = TrainLocks::new();
        let a = locks.handle("t1").unwrap();
        let _guard = acquire(&a, "test").unwrap();
        let again = locks.handle("t1").unwrap();
        assert!(again.try_lock().is_err());
    }
}
