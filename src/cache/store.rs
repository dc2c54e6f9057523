//! Cache Store Module
//!
//! The entry map and its statistics. `CacheStore` is not synchronized on its
//! own; `TimedCache` wraps it in a lock shared with the reaper task.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// Key to payload storage with age bookkeeping.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Usage statistics
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Add ==
    /// Inserts or replaces the entry for `key`, stamping the current instant.
    ///
    /// Any key (including the empty string) and any payload (including an
    /// empty one) is accepted.
    pub fn add(&mut self, key: String, value: Vec<u8>) {
        self.entries.insert(key, CacheEntry::new(value));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Returns a copy of the payload stored under `key`.
    ///
    /// The entry's age is not consulted: an entry past its max-age is still
    /// returned until a sweep removes it.
    pub fn get(&mut self, key: &str) -> Option<Vec<u8>> {
        match self.entries.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Expired Keys ==
    /// Lists the keys whose cutoff lies strictly before `now`.
    pub fn expired_keys(&self, max_age: Duration, now: Instant) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.is_older_than(max_age, now))
            .map(|(key, _)| key.clone())
            .collect()
    }

    // == Remove Expired ==
    /// Removes the given candidate keys that are still expired at `now`.
    ///
    /// A candidate re-added after it was listed carries a fresh timestamp and
    /// is kept. Returns the number of entries removed.
    pub fn remove_expired(&mut self, candidates: &[String], max_age: Duration, now: Instant) -> usize {
        let mut removed = 0;

        for key in candidates {
            let still_expired = self
                .entries
                .get(key)
                .is_some_and(|entry| entry.is_older_than(max_age, now));

            if still_expired {
                self.entries.remove(key);
                removed += 1;
            }
        }

        self.stats.record_reaped(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries in the store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
