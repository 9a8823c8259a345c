use std::sync::atomic::{AtomicU64, Ordering};

/// Source of globally unique entity identifiers.
///
/// The returned string is used both as the entity's primary key in its store
/// and as the entity's `id` field.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Time-ordered UUID v7 identifiers.
///
/// Because v7 ids sort by creation time, iterating a store in key order
/// yields records in insertion order.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidV7Generator;

impl IdGenerator for UuidV7Generator {
    fn next_id(&self) -> String {
        uuid::Uuid::now_v7().to_string()
    }
}

/// Deterministic ids (`{prefix}-00000000000000000001`, ...) for tests and
/// reproducible fixtures. Padded to the width of `u64::MAX` so key order
/// matches issue order for every counter value.
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("id")
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{n:020}", self.prefix)
    }
}
