//! Business services containing the request-time security logic.

pub mod auth;
pub mod backend;
pub mod rate_limit;
pub mod revocation;
pub mod token;

// Re-export commonly used types
pub use auth::{
    AnonymousReason, AuthOutcome, AuthService, AuthServiceConfig, AuthenticatedPrincipal, Authenticator,
    Principal, PrincipalLoader, RegisterCommand, UserPrincipalLoader,
};
pub use backend::{
    CounterBackend, KeyValueBackend, MemoryCounterStore, MemoryKeyValueStore, PrimaryStatus, StoreTier,
    TieredStore,
};
pub use rate_limit::{RateLimitPolicy, RateLimitStatus, RateLimiter};
pub use revocation::{Revocation, RevocationStore};
pub use token::{fingerprint, TokenCodec, TokenServiceConfig};
