//! Monotonic identifier issuance for pet types.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::types::TypeId;

/// Issues `"1"`, `"2"`, `"3"`, ... in order. Freed ids are never reused.
///
/// The counter is atomic, so concurrent callers never observe the same id.
#[derive(Debug)]
pub struct IdGenerator {
    next: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// Return the current value as a string and advance the counter.
    pub fn next_id(&self) -> TypeId {
        self.next.fetch_add(1, Ordering::SeqCst).to_string()
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
