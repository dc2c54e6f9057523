//! Cache Module
//!
//! Provides in-memory caching of raw response payloads with age-based expiry.

mod entry;
mod stats;
mod store;
mod timed;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::CacheStore;
pub use timed::{CacheConfig, TimedCache};
