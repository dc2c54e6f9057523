//! Cache Entry Module
//!
//! Defines a single cached payload together with its insertion instant.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// A raw payload and the instant it was stored.
///
/// Entries are never mutated in place: re-adding a key replaces the whole
/// entry, which also resets its age.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored payload
    pub value: Vec<u8>,
    /// Insertion instant
    pub created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current instant.
    pub fn new(value: Vec<u8>) -> Self {
        Self {
            value,
            created_at: Instant::now(),
        }
    }

    // == Is Older Than ==
    /// Checks whether the entry's cutoff (`created_at + max_age`) lies strictly
    /// before `now`.
    ///
    /// An entry whose cutoff equals `now` is still considered fresh. A cutoff
    /// that overflows the clock never expires.
    pub fn is_older_than(&self, max_age: Duration, now: Instant) -> bool {
        match self.created_at.checked_add(max_age) {
            Some(cutoff) => cutoff < now,
            None => false,
        }
    }
}
