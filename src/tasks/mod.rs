//! Background Tasks Module
//!
//! Contains the tasks that run alongside the REPL for the lifetime of a cache.
//!
//! # Tasks
//! - Reaper: removes cache entries older than their max-age at a fixed period

mod reaper;

pub use reaper::{spawn_reaper, MAX_SWEEP_INTERVAL, MIN_SWEEP_INTERVAL};
