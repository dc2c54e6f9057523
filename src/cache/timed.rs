//! Timed Cache Module
//!
//! A concurrency-safe key/payload cache whose entries are removed by a
//! background reaper once they are older than the configured max-age.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::cache::{CacheStats, CacheStore};
use crate::tasks::spawn_reaper;

// == Cache Config ==
/// Expiry settings for a [`TimedCache`].
///
/// `max_age` is how old an entry may get before a sweep removes it;
/// `sweep_interval` is the period of the sweep itself. [`CacheConfig::coupled`]
/// uses one duration for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    pub max_age: Duration,
    pub sweep_interval: Duration,
}

impl CacheConfig {
    pub fn coupled(interval: Duration) -> Self {
        Self {
            max_age: interval,
            sweep_interval: interval,
        }
    }
}

// == Timed Cache ==
/// Memoized storage for raw payloads keyed by string, with age-based expiry.
///
/// Lookups never check age. An entry can therefore be observed after it has
/// outlived `max_age`, until the next sweep tick removes it.
///
/// The reaper runs as a Tokio task from construction until [`close`] is
/// awaited or the cache is dropped; dropping the cache drops the shutdown
/// sender, which ends the task.
///
/// [`close`]: TimedCache::close
#[derive(Debug)]
pub struct TimedCache {
    store: Arc<RwLock<CacheStore>>,
    shutdown_tx: watch::Sender<bool>,
    reaper: Option<JoinHandle<()>>,
}

impl TimedCache {
    // == Constructor ==
    /// Creates a cache whose max-age and sweep period are both `interval`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(interval: Duration) -> Self {
        Self::with_config(CacheConfig::coupled(interval))
    }

    /// Creates a cache with separate max-age and sweep period.
    ///
    /// The sweep period is clamped to `MIN_SWEEP_INTERVAL..=MAX_SWEEP_INTERVAL`
    /// (one millisecond to one year). Must be called from within a Tokio
    /// runtime.
    pub fn with_config(config: CacheConfig) -> Self {
        let store = Arc::new(RwLock::new(CacheStore::new()));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let reaper = spawn_reaper(
            store.clone(),
            config.max_age,
            config.sweep_interval,
            shutdown_rx,
        );

        Self {
            store,
            shutdown_tx,
            reaper: Some(reaper),
        }
    }

    // == Add ==
    /// Inserts or replaces the payload for `key`, resetting its age.
    pub async fn add(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        let key = key.into();
        let value = value.into();
        debug!(key = %key, bytes = value.len(), "cache add");

        self.store.write().await.add(key, value);
    }

    // == Get ==
    /// Returns the payload stored under `key`, or `None` if there is none.
    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        let value = self.store.write().await.get(key);

        if value.is_some() {
            debug!(key = %key, "cache hit");
        } else {
            debug!(key = %key, "cache miss");
        }
        value
    }

    // == Close ==
    /// Stops the reaper and waits for it to finish.
    ///
    /// Entries already stored stay readable, but nothing expires afterwards.
    /// Calling this more than once is a no-op.
    pub async fn close(&mut self) {
        let Some(handle) = self.reaper.take() else {
            return;
        };

        let _ = self.shutdown_tx.send(true);
        if let Err(e) = handle.await {
            debug!("Reaper task ended abnormally: {}", e);
        }
    }

    /// Returns true once [`close`](TimedCache::close) has completed.
    pub fn is_closed(&self) -> bool {
        self.reaper.is_none()
    }

    // == Stats ==
    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}
