//! Unit tests for the in-process storage tier

use std::sync::Arc;
use std::time::Duration;

use crate::services::backend::{MemoryCounterStore, MemoryKeyValueStore, PURGE_INTERVAL};

#[tokio::test(start_paused = true)]
async fn test_value_readable_until_expiry() {
    let store = MemoryKeyValueStore::new();
    store.write("blacklist:abc", "LOGOUT", Duration::from_secs(10));

    assert_eq!(store.read("blacklist:abc"), Some("LOGOUT".to_string()));

    tokio::time::advance(Duration::from_secs(9)).await;
    assert!(store.read("blacklist:abc").is_some());

    tokio::time::advance(Duration::from_secs(1)).await;
    assert!(store.read("blacklist:abc").is_none());
    assert!(store.is_empty(), "expired entry should be evicted on read");
}

#[tokio::test(start_paused = true)]
async fn test_purge_expired() {
    let store = MemoryKeyValueStore::new();
    store.write("short", "1", Duration::from_secs(1));
    store.write("long", "1", Duration::from_secs(60));

    tokio::time::advance(Duration::from_secs(2)).await;
    assert_eq!(store.purge_expired(), 1);
    assert_eq!(store.len(), 1);
    assert!(store.read("long").is_some());
}

#[tokio::test(start_paused = true)]
async fn test_writes_trigger_periodic_sweep() {
    let store = MemoryKeyValueStore::new();
    store.write("stale", "1", Duration::from_millis(1));
    tokio::time::advance(Duration::from_millis(5)).await;

    for i in 0..PURGE_INTERVAL {
        store.write(&format!("k{}", i), "1", Duration::from_secs(60));
    }
    assert_eq!(store.len(), PURGE_INTERVAL as usize);
}

#[test]
fn test_remove() {
    let store = MemoryKeyValueStore::new();
    store.write("k", "v", Duration::from_secs(60));
    store.remove("k");
    assert!(store.read("k").is_none());
}

#[tokio::test(start_paused = true)]
async fn test_counter_fixed_window() {
    let counters = MemoryCounterStore::new();
    let window = Duration::from_secs(60);

    for expected in 1..=5 {
        assert_eq!(counters.increment("rate:10.0.0.1", window), expected);
    }
    assert_eq!(counters.current("rate:10.0.0.1"), 5);

    tokio::time::advance(Duration::from_secs(59)).await;
    assert_eq!(counters.increment("rate:10.0.0.1", window), 6);

    tokio::time::advance(Duration::from_secs(1)).await;
    assert_eq!(counters.current("rate:10.0.0.1"), 0);
    assert_eq!(counters.increment("rate:10.0.0.1", window), 1);
}

#[test]
fn test_counters_are_independent_per_key() {
    let counters = MemoryCounterStore::new();
    let window = Duration::from_secs(60);

    counters.increment("rate:a", window);
    counters.increment("rate:a", window);
    assert_eq!(counters.increment("rate:b", window), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_increments_are_not_lost() {
    let counters = Arc::new(MemoryCounterStore::new());
    let window = Duration::from_secs(60);

    let handles: Vec<_> = (0..50)
        .map(|_| {
            let counters = counters.clone();
            tokio::spawn(async move {
                for _ in 0..20 {
                    counters.increment("rate:shared", window);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap();
    }
    assert_eq!(counters.current("rate:shared"), 1000);
}
