//! In-process storage tier
//!
//! Entries live in lock-striped `DashMap`s. Per-key operations take only the
//! shard lock for that key. Expired entries are dropped lazily on access and
//! swept every [`PURGE_INTERVAL`] writes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::time::Instant;

use crate::errors::BackendError;

use super::traits::{CounterBackend, KeyValueBackend};

/// Writes between full sweeps of expired entries
pub const PURGE_INTERVAL: u64 = 1024;

#[derive(Debug)]
struct Entry {
    value: String,
    expires_at: Instant,
}

/// Process-local key/value store with per-entry expiry
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: DashMap<String, Entry>,
    writes: AtomicU64,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live value for `key`, evicting it if it has expired
    pub fn read(&self, key: &str) -> Option<String> {
        let now = Instant::now();
        match self.entries.get(key) {
            None => return None,
            Some(entry) if entry.expires_at > now => return Some(entry.value.clone()),
            Some(_) => {}
        }

        // Shard guard is released above; re-check under the write lock.
        self.entries.remove_if(key, |_, entry| entry.expires_at <= now);
        None
    }

    pub fn write(&self, key: &str, value: &str, ttl: Duration) {
        self.entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );

        if self.writes.fetch_add(1, Ordering::Relaxed) % PURGE_INTERVAL == PURGE_INTERVAL - 1 {
            self.purge_expired();
        }
    }

    pub fn remove(&self, key: &str) {
        self.entries.remove(key);
    }

    /// Drops every expired entry, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.expires_at > now);
        before.saturating_sub(self.entries.len())
    }

    /// Number of stored entries, including expired ones not yet evicted
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl KeyValueBackend for MemoryKeyValueStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn try_read(&self, key: &str) -> Result<Option<String>, BackendError> {
        Ok(self.read(key))
    }

    async fn try_write(&self, key: &str, value: &str, ttl: Duration) -> Result<(), BackendError> {
        self.write(key, value, ttl);
        Ok(())
    }

    async fn try_remove(&self, key: &str) -> Result<(), BackendError> {
        self.remove(key);
        Ok(())
    }
}

#[derive(Debug)]
struct Window {
    count: u64,
    expires_at: Instant,
}

/// Process-local fixed-window counters
#[derive(Debug, Default)]
pub struct MemoryCounterStore {
    windows: DashMap<String, Window>,
    increments: AtomicU64,
}

impl MemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments `key` inside its current window, opening a new one when
    /// the previous window has ended
    pub fn increment(&self, key: &str, window: Duration) -> u64 {
        let now = Instant::now();
        let count = {
            let mut slot = self.windows.entry(key.to_string()).or_insert_with(|| Window {
                count: 0,
                expires_at: now + window,
            });

            if slot.expires_at <= now {
                slot.count = 0;
                slot.expires_at = now + window;
            }
            slot.count += 1;
            slot.count
        };

        if self.increments.fetch_add(1, Ordering::Relaxed) % PURGE_INTERVAL == PURGE_INTERVAL - 1 {
            self.purge_expired();
        }
        count
    }

    /// Current count for `key`, zero when no window is open
    pub fn current(&self, key: &str) -> u64 {
        let now = Instant::now();
        self.windows
            .get(key)
            .filter(|w| w.expires_at > now)
            .map(|w| w.count)
            .unwrap_or(0)
    }

    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.windows.len();
        self.windows.retain(|_, w| w.expires_at > now);
        before.saturating_sub(self.windows.len())
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

#[async_trait]
impl CounterBackend for MemoryCounterStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn try_increment(&self, key: &str, window: Duration) -> Result<u64, BackendError> {
        Ok(self.increment(key, window))
    }
}
