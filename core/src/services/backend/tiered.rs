//! Primary/fallback coordination for key/value records

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use super::bounded;
use super::memory::MemoryKeyValueStore;
use super::traits::KeyValueBackend;

/// Tier that accepted a write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreTier {
    Primary,
    Fallback,
}

/// Reachability of the primary tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryStatus {
    NotConfigured,
    Reachable,
    Unreachable,
}

/// Shared primary backend in front of a process-local fallback
///
/// Primary calls are bounded by `operation_timeout`. A failed or slow primary
/// never surfaces to the caller: writes land in the fallback and reads
/// consult it. A successful primary write clears any stale fallback entry for
/// the same key.
pub struct TieredStore {
    primary: Option<Arc<dyn KeyValueBackend>>,
    fallback: MemoryKeyValueStore,
    operation_timeout: Duration,
}

impl TieredStore {
    pub fn new(primary: Option<Arc<dyn KeyValueBackend>>, operation_timeout: Duration) -> Self {
        Self {
            primary,
            fallback: MemoryKeyValueStore::new(),
            operation_timeout,
        }
    }

    /// Store without a shared tier
    pub fn fallback_only(operation_timeout: Duration) -> Self {
        Self::new(None, operation_timeout)
    }

    pub fn fallback(&self) -> &MemoryKeyValueStore {
        &self.fallback
    }

    /// Writes `key`, preferring the primary tier
    pub async fn write(&self, key: &str, value: &str, ttl: Duration) -> StoreTier {
        if let Some(primary) = &self.primary {
            match bounded(self.operation_timeout, primary.try_write(key, value, ttl)).await {
                Ok(()) => {
                    self.fallback.remove(key);
                    return StoreTier::Primary;
                }
                Err(e) => {
                    tracing::warn!(
                        backend = primary.name(),
                        error = %e,
                        "Primary write failed, recording in process-local fallback"
                    );
                }
            }
        }

        self.fallback.write(key, value, ttl);
        StoreTier::Fallback
    }

    /// Whether a live record exists in either tier
    pub async fn contains(&self, key: &str) -> bool {
        if let Some(primary) = &self.primary {
            match bounded(self.operation_timeout, primary.try_read(key)).await {
                Ok(Some(_)) => return true,
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(
                        backend = primary.name(),
                        error = %e,
                        "Primary read failed, consulting process-local fallback"
                    );
                }
            }
        }

        self.fallback.read(key).is_some()
    }

    /// Probes the primary tier within the operation timeout
    pub async fn primary_status(&self) -> PrimaryStatus {
        match &self.primary {
            None => PrimaryStatus::NotConfigured,
            Some(primary) => match bounded(self.operation_timeout, primary.ping()).await {
                Ok(()) => PrimaryStatus::Reachable,
                Err(e) => {
                    tracing::debug!(backend = primary.name(), error = %e, "Primary ping failed");
                    PrimaryStatus::Unreachable
                }
            },
        }
    }
}
