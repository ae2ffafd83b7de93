//! Token revocation (logout blacklist)

use std::sync::Arc;

use crate::services::backend::{PrimaryStatus, StoreTier, TieredStore};
use crate::services::token::{fingerprint, TokenCodec};

/// Key prefix of revocation records
pub const REVOCATION_KEY_PREFIX: &str = "blacklist:";

/// Value stored for a revoked token
pub const REVOCATION_MARKER: &str = "LOGOUT";

/// Result of a revoke call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Revocation {
    /// Recorded until the token's own expiry
    Recorded(StoreTier),
    /// Token already expired or invalid, nothing to record
    Unnecessary,
}

/// Records revoked tokens until they would have expired anyway
///
/// Records go to the shared cache when it answers in time and to the
/// process-local fallback otherwise. Neither `revoke` nor `is_revoked`
/// returns an error. A record that only reached the fallback is visible to
/// this process alone.
pub struct RevocationStore {
    codec: Arc<TokenCodec>,
    tiers: TieredStore,
}

impl RevocationStore {
    pub fn new(codec: Arc<TokenCodec>, tiers: TieredStore) -> Self {
        Self { codec, tiers }
    }

    /// Storage key for a token
    pub fn record_key(token: &str) -> String {
        format!("{}{}", REVOCATION_KEY_PREFIX, fingerprint(token))
    }

    /// Revokes `token` for the rest of its lifetime
    pub async fn revoke(&self, token: &str) -> Revocation {
        let ttl = self.codec.remaining_lifetime(token);
        if ttl.is_zero() {
            tracing::debug!("Skipping revocation of a token that is already expired or invalid");
            return Revocation::Unnecessary;
        }

        let key = Self::record_key(token);
        let tier = self.tiers.write(&key, REVOCATION_MARKER, ttl).await;

        tracing::info!(
            record = %&key[REVOCATION_KEY_PREFIX.len()..REVOCATION_KEY_PREFIX.len() + 12],
            tier = ?tier,
            ttl_ms = ttl.as_millis() as u64,
            "Token revoked"
        );
        Revocation::Recorded(tier)
    }

    /// Whether `token` has been revoked and has not yet expired
    pub async fn is_revoked(&self, token: &str) -> bool {
        self.tiers.contains(&Self::record_key(token)).await
    }

    pub async fn primary_status(&self) -> PrimaryStatus {
        self.tiers.primary_status().await
    }

    /// Records held only by this process
    pub fn local_record_count(&self) -> usize {
        self.tiers.fallback().len()
    }
}
