//! Reaper Task
//!
//! Background task that periodically sweeps aged entries out of a cache store.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::cache::CacheStore;

/// Smallest sweep period the reaper will run with.
pub const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(1);

/// Largest sweep period the reaper will run with (one year).
pub const MAX_SWEEP_INTERVAL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Spawns a task that sweeps `store` every `sweep_interval`.
///
/// On each tick `t` the task removes every entry whose `created_at + max_age`
/// is strictly before `t`. The first tick fires one full period after the
/// call. Candidate keys are listed under the read lock and removed under the
/// write lock, so lookups only ever wait for a map access.
///
/// The task ends when `true` is sent on `shutdown` or when the sender is
/// dropped.
///
/// # Example
/// ```ignore
/// let store = Arc::new(RwLock::new(CacheStore::new()));
/// let (shutdown_tx, shutdown_rx) = watch::channel(false);
/// let handle = spawn_reaper(store, Duration::from_secs(5), Duration::from_secs(5), shutdown_rx);
/// // Later:
/// shutdown_tx.send(true)?;
/// handle.await?;
/// ```
pub fn spawn_reaper(
    store: Arc<RwLock<CacheStore>>,
    max_age: Duration,
    sweep_interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    let period = sweep_period(sweep_interval);

    let now = Instant::now();
    let first_tick = now.checked_add(period).unwrap_or(now);
    let mut ticker = interval_at(first_tick, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tokio::spawn(async move {
        debug!(
            "Starting cache reaper: max_age={:?}, period={:?}",
            max_age, period
        );

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        debug!("Cache reaper shutting down");
                        return;
                    }
                }
                tick = ticker.tick() => {
                    let removed = sweep(&store, max_age, tick).await;

                    if removed > 0 {
                        info!("Cache sweep: removed {} aged entries", removed);
                    } else {
                        debug!("Cache sweep: no aged entries found");
                    }
                }
            }
        }
    })
}

/// Clamps `sweep_interval` into `MIN_SWEEP_INTERVAL..=MAX_SWEEP_INTERVAL`.
fn sweep_period(sweep_interval: Duration) -> Duration {
    if sweep_interval < MIN_SWEEP_INTERVAL {
        warn!(
            "Sweep interval {:?} is below {:?}, clamping",
            sweep_interval, MIN_SWEEP_INTERVAL
        );
        MIN_SWEEP_INTERVAL
    } else if sweep_interval > MAX_SWEEP_INTERVAL {
        warn!(
            "Sweep interval {:?} is above {:?}, capping",
            sweep_interval, MAX_SWEEP_INTERVAL
        );
        MAX_SWEEP_INTERVAL
    } else {
        sweep_interval
    }
}

/// Runs a single sweep at `tick` and returns the number of entries removed.
async fn sweep(store: &RwLock<CacheStore>, max_age: Duration, tick: Instant) -> usize {
    let candidates = store.read().await.expired_keys(max_age, tick);
    if candidates.is_empty() {
        return 0;
    }

    store
        .write()
        .await
        .remove_expired(&candidates, max_age, tick)
}
