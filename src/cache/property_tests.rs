//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check write/read coherence, misses, overwrites and
//! concurrent use of `TimedCache`, with and without sweeps racing the callers.

use proptest::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheConfig, TimedCache};

// == Test Configuration ==
/// Long enough that no sweep can run while a case executes
const TEST_INTERVAL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Generates cache keys shaped like request URLs, including the empty key
fn key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-z-]{1,16}(/[0-9]{1,3})?".prop_map(|s| s),
    ]
}

/// Generates arbitrary payloads, including empty ones
fn payload_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..256)
}

#[derive(Debug, Clone)]
enum CacheOp {
    Add { key: String, value: Vec<u8> },
    Get { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    // Small key space so operations overlap
    let key = "k[0-4]".prop_map(|s| s);
    prop_oneof![
        (key.clone(), payload_strategy()).prop_map(|(key, value)| CacheOp::Add { key, value }),
        key.prop_map(|key| CacheOp::Get { key }),
    ]
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Runtime::new().unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Add(k, v) immediately followed by Get(k) returns v.
    #[test]
    fn prop_write_read_coherence(key in key_strategy(), value in payload_strategy()) {
        let retrieved = runtime().block_on(async {
            let cache = TimedCache::new(TEST_INTERVAL);
            cache.add(key.clone(), value.clone()).await;
            cache.get(&key).await
        });

        prop_assert_eq!(retrieved, Some(value));
    }

    // A key never passed to Add is a miss.
    #[test]
    fn prop_miss_on_absent_key(
        stored in prop::collection::hash_map(key_strategy(), payload_strategy(), 0..20),
        absent in key_strategy()
    ) {
        prop_assume!(!stored.contains_key(&absent));

        let retrieved = runtime().block_on(async {
            let cache = TimedCache::new(TEST_INTERVAL);
            for (key, value) in &stored {
                cache.add(key.clone(), value.clone()).await;
            }
            cache.get(&absent).await
        });

        prop_assert_eq!(retrieved, None);
    }

    // Add(k, v1), Add(k, v2), Get(k) returns v2 and leaves a single entry.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in payload_strategy(),
        value2 in payload_strategy()
    ) {
        let (retrieved, len) = runtime().block_on(async {
            let cache = TimedCache::new(TEST_INTERVAL);
            cache.add(key.clone(), value1).await;
            cache.add(key.clone(), value2.clone()).await;
            (cache.get(&key).await, cache.len().await)
        });

        prop_assert_eq!(retrieved, Some(value2));
        prop_assert_eq!(len, 1);
    }
}

// == Concurrent Use ==
/// Payloads each key was written with
fn written_values(operations: &[(CacheOp, u64)]) -> HashMap<String, HashSet<Vec<u8>>> {
    let mut written: HashMap<String, HashSet<Vec<u8>>> = HashMap::new();
    for (op, _) in operations {
        if let CacheOp::Add { key, value } = op {
            written.entry(key.clone()).or_default().insert(value.clone());
        }
    }
    written
}

/// Runs every operation as its own task on a multi-thread runtime, each
/// after its delay in milliseconds, and returns the hits.
fn run_concurrently(
    config: CacheConfig,
    operations: Vec<(CacheOp, u64)>,
) -> Vec<(String, Vec<u8>)> {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .enable_all()
        .build()
        .unwrap();

    rt.block_on(async {
        let cache = Arc::new(TimedCache::with_config(config));

        let handles: Vec<_> = operations
            .into_iter()
            .map(|(op, delay_ms)| {
                let cache = Arc::clone(&cache);
                tokio::spawn(async move {
                    if delay_ms > 0 {
                        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                    }
                    match op {
                        CacheOp::Add { key, value } => {
                            cache.add(key, value).await;
                            None
                        }
                        CacheOp::Get { key } => {
                            cache.get(&key).await.map(|value| (key, value))
                        }
                    }
                })
            })
            .collect();

        let mut observed = Vec::new();
        for handle in handles {
            if let Some(hit) = handle.await.expect("Task should not panic") {
                observed.push(hit);
            }
        }
        observed
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    // Every hit returns a payload that some Add call wrote for that key.
    #[test]
    fn prop_concurrent_hits_are_complete_writes(
        operations in prop::collection::vec(cache_op_strategy(), 10..80)
    ) {
        let operations: Vec<_> = operations.into_iter().map(|op| (op, 0)).collect();
        let written = written_values(&operations);

        let observed = run_concurrently(CacheConfig::coupled(TEST_INTERVAL), operations);

        for (key, value) in observed {
            let candidates = written.get(&key);
            prop_assert!(
                candidates.is_some_and(|set| set.contains(&value)),
                "Hit on '{}' returned a payload no Add wrote",
                key
            );
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    // Same guarantee while the reaper sweeps every millisecond: a hit is
    // either a complete write or the entry is gone, never a torn value.
    #[test]
    fn prop_concurrent_hits_survive_sweeps(
        operations in prop::collection::vec((cache_op_strategy(), 0u64..8), 10..60)
    ) {
        let written = written_values(&operations);

        let observed = run_concurrently(
            CacheConfig {
                max_age: Duration::from_millis(1),
                sweep_interval: Duration::from_millis(1),
            },
            operations,
        );

        for (key, value) in observed {
            let candidates = written.get(&key);
            prop_assert!(
                candidates.is_some_and(|set| set.contains(&value)),
                "Hit on '{}' returned a payload no Add wrote",
                key
            );
        }
    }
}
