//! Bearer token authentication decision
//!
//! ```text
//! token -- revoked? --yes--> Revoked (terminal)
//!             | no
//!          verify --invalid--> Anonymous(InvalidToken)
//!             | valid
//!          load principal --fail--> Anonymous(PrincipalNotFound)
//!             |
//!          subject == identity --no--> Anonymous(SubjectMismatch)
//!             | yes
//!          Authenticated
//! ```

use std::sync::Arc;

use crate::domain::entities::token::TokenKind;
use crate::services::revocation::RevocationStore;
use crate::services::token::TokenCodec;

use super::principal::{AuthenticatedPrincipal, PrincipalLoader};

/// Why a request carrying a token proceeds without identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnonymousReason {
    InvalidToken,
    PrincipalNotFound,
    SubjectMismatch,
}

/// Result of authenticating a bearer token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Authenticated(AuthenticatedPrincipal),
    Anonymous(AnonymousReason),
    /// Token was revoked; the request must be rejected
    Revoked,
}

pub struct Authenticator {
    codec: Arc<TokenCodec>,
    revocations: Arc<RevocationStore>,
    principals: Arc<dyn PrincipalLoader>,
}

impl Authenticator {
    pub fn new(
        codec: Arc<TokenCodec>,
        revocations: Arc<RevocationStore>,
        principals: Arc<dyn PrincipalLoader>,
    ) -> Self {
        Self {
            codec,
            revocations,
            principals,
        }
    }

    pub async fn authenticate(&self, token: &str) -> AuthOutcome {
        if self.revocations.is_revoked(token).await {
            return AuthOutcome::Revoked;
        }

        let verified = match self.codec.verify_kind(token, TokenKind::Access) {
            Ok(verified) => verified,
            Err(_) => return AuthOutcome::Anonymous(AnonymousReason::InvalidToken),
        };

        let principal = match self.principals.load_principal(&verified.subject).await {
            Ok(principal) => principal,
            Err(e) => {
                tracing::debug!(error = %e, "Token subject did not resolve to a principal");
                return AuthOutcome::Anonymous(AnonymousReason::PrincipalNotFound);
            }
        };

        if principal.identity() != verified.subject {
            tracing::warn!(user_id = %principal.user_id, "Resolved principal does not match token subject");
            return AuthOutcome::Anonymous(AnonymousReason::SubjectMismatch);
        }

        AuthOutcome::Authenticated(AuthenticatedPrincipal {
            principal,
            token_expires_at: verified.expires_at,
        })
    }
}
