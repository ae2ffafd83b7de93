//! Unit tests for the revocation store

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::domain::entities::token::TokenKind;
use crate::services::backend::tests::mocks::{FailingBackend, StalledBackend, SwitchableBackend};
use crate::services::backend::{KeyValueBackend, StoreTier, TieredStore};
use crate::services::revocation::{Revocation, RevocationStore, REVOCATION_KEY_PREFIX};
use crate::services::token::{TokenCodec, TokenServiceConfig};

const TIMEOUT: Duration = Duration::from_millis(250);

fn codec() -> Arc<TokenCodec> {
    Arc::new(TokenCodec::new(TokenServiceConfig::new(
        "revocation-test-secret-0123456789abcdef",
    )))
}

fn store_with(primary: Option<Arc<dyn KeyValueBackend>>) -> (Arc<TokenCodec>, RevocationStore) {
    let codec = codec();
    let store = RevocationStore::new(codec.clone(), TieredStore::new(primary, TIMEOUT));
    (codec, store)
}

#[test]
fn test_record_key_hashes_token() {
    let key = RevocationStore::record_key("some.jwt.value");
    assert!(key.starts_with(REVOCATION_KEY_PREFIX));
    assert_eq!(key.len(), REVOCATION_KEY_PREFIX.len() + 64);
    assert!(!key.contains("some.jwt.value"));
}

#[tokio::test]
async fn test_revoke_with_healthy_primary() {
    let primary = Arc::new(SwitchableBackend::default());
    let (codec, store) = store_with(Some(primary.clone()));
    let token = codec.issue("user-1", TokenKind::Access).unwrap();

    assert!(!store.is_revoked(&token).await);
    assert_eq!(store.revoke(&token).await, Revocation::Recorded(StoreTier::Primary));
    assert!(store.is_revoked(&token).await);
    assert!(primary.holds(&RevocationStore::record_key(&token)));
    assert_eq!(store.local_record_count(), 0);
}

#[tokio::test]
async fn test_other_tokens_unaffected() {
    let (codec, store) = store_with(None);
    let revoked = codec.issue("user-1", TokenKind::Access).unwrap();
    let other = codec.issue("user-1", TokenKind::Access).unwrap();

    store.revoke(&revoked).await;
    assert!(store.is_revoked(&revoked).await);
    assert!(!store.is_revoked(&other).await);
}

#[tokio::test]
async fn test_expired_token_is_not_recorded() {
    let (codec, store) = store_with(None);
    let expired = codec
        .issue_at("user-1", TokenKind::Access, Utc::now() - chrono::Duration::hours(1))
        .unwrap();

    assert_eq!(store.revoke(&expired).await, Revocation::Unnecessary);
    assert_eq!(store.local_record_count(), 0);
}

#[tokio::test]
async fn test_garbage_token_is_not_recorded() {
    let (_, store) = store_with(None);
    assert_eq!(store.revoke("not-a-token").await, Revocation::Unnecessary);
    assert!(!store.is_revoked("not-a-token").await);
}

#[tokio::test]
async fn test_revocation_survives_primary_outage_locally() {
    let primary: Arc<dyn KeyValueBackend> = Arc::new(FailingBackend::default());
    let (codec, store) = store_with(Some(primary));
    let token = codec.issue("user-1", TokenKind::Access).unwrap();

    assert_eq!(store.revoke(&token).await, Revocation::Recorded(StoreTier::Fallback));
    assert!(store.is_revoked(&token).await);
    assert_eq!(store.local_record_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_stalled_primary_does_not_block_revocation() {
    let (codec, store) = store_with(Some(Arc::new(StalledBackend)));
    let token = codec.issue("user-1", TokenKind::Access).unwrap();

    assert_eq!(store.revoke(&token).await, Revocation::Recorded(StoreTier::Fallback));
    assert!(store.is_revoked(&token).await);
}

#[tokio::test]
async fn test_outage_record_still_honoured_after_primary_recovers() {
    let primary = Arc::new(SwitchableBackend::default());
    let (codec, store) = store_with(Some(primary.clone()));
    let token = codec.issue("user-1", TokenKind::Access).unwrap();

    primary.set_down(true);
    store.revoke(&token).await;
    primary.set_down(false);

    assert!(store.is_revoked(&token).await);
}

#[tokio::test(start_paused = true)]
async fn test_revoked_until_own_expiry_then_not() {
    let (codec, store) = store_with(None);
    // Backdated so that between 1 and 2 seconds of lifetime remain.
    let issued_at = Utc::now() - codec.ttl(TokenKind::Access) + chrono::Duration::seconds(2);
    let token = codec.issue_at("user-1", TokenKind::Access, issued_at).unwrap();

    let remaining = codec.remaining_lifetime(&token);
    assert!(remaining > Duration::ZERO && remaining <= Duration::from_secs(2));

    store.revoke(&token).await;
    assert!(store.is_revoked(&token).await);

    tokio::time::advance(remaining + Duration::from_millis(1)).await;
    assert!(!store.is_revoked(&token).await);
    assert_eq!(store.local_record_count(), 0);
}
