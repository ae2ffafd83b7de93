//! Signed session token codec

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sha2::{Digest, Sha256};

use crate::domain::entities::token::{Claims, TokenKind, TokenPair, VerifiedToken};
use crate::errors::TokenError;

use super::config::TokenServiceConfig;

/// Issues and verifies HS256 session tokens
///
/// The codec holds no mutable state. Verification failures of any kind
/// (bad signature, malformed encoding, wrong issuer, expiry) surface as
/// [`TokenError::InvalidToken`]; the concrete reason is only logged.
pub struct TokenCodec {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// Creates a codec from immutable signing settings
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        // Expiry is checked by hand so that `exp == now` already counts as expired.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Lifetime configured for a token kind
    pub fn ttl(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.config.access_token_ttl,
            TokenKind::Refresh => self.config.refresh_token_ttl,
        }
    }

    /// Issues a token for `subject` valid from now
    pub fn issue(&self, subject: &str, kind: TokenKind) -> Result<String, TokenError> {
        self.issue_at(subject, kind, Utc::now())
    }

    /// Issues a token as if the clock read `issued_at`
    pub fn issue_at(
        &self,
        subject: &str,
        kind: TokenKind,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = Claims::new(subject, kind, issued_at, self.ttl(kind), self.config.issuer.as_str());
        if !claims.has_valid_lifetime() {
            return Err(TokenError::TokenGenerationFailed);
        }

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign token");
            TokenError::TokenGenerationFailed
        })
    }

    /// Issues an access and a refresh token for the same subject
    pub fn issue_pair(&self, subject: &str) -> Result<TokenPair, TokenError> {
        let access_token = self.issue(subject, TokenKind::Access)?;
        let refresh_token = self.issue(subject, TokenKind::Refresh)?;

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.config.access_token_ttl.num_seconds(),
            self.config.refresh_token_ttl.num_seconds(),
        ))
    }

    /// Verifies signature, issuer and lifetime
    pub fn verify(&self, token: &str) -> Result<VerifiedToken, TokenError> {
        let claims = self.decode_signed(token)?;

        if !claims.has_valid_lifetime() || claims.is_expired_at(Utc::now()) {
            tracing::debug!(token = %fingerprint(token), "Token expired");
            return Err(TokenError::InvalidToken);
        }

        Ok(VerifiedToken::from(claims))
    }

    /// Verifies a token and requires it to be of `kind`
    pub fn verify_kind(&self, token: &str, kind: TokenKind) -> Result<VerifiedToken, TokenError> {
        let verified = self.verify(token)?;
        if verified.kind != kind {
            tracing::debug!(
                token = %fingerprint(token),
                expected = %kind,
                actual = %verified.kind,
                "Token kind mismatch"
            );
            return Err(TokenError::InvalidToken);
        }
        Ok(verified)
    }

    /// Time left until the token expires, zero for expired or invalid tokens
    pub fn remaining_lifetime(&self, token: &str) -> std::time::Duration {
        let Ok(claims) = self.decode_signed(token) else {
            return std::time::Duration::ZERO;
        };

        let remaining_ms = claims
            .exp
            .saturating_mul(1000)
            .saturating_sub(Utc::now().timestamp_millis());

        u64::try_from(remaining_ms)
            .map(std::time::Duration::from_millis)
            .unwrap_or(std::time::Duration::ZERO)
    }

    /// Signature and issuer check, no lifetime check
    fn decode_signed(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(token = %fingerprint(token), reason = ?e.kind(), "Token rejected");
                TokenError::InvalidToken
            })
    }
}

/// SHA-256 hex digest of a raw token
///
/// Used as the storage key for revocation records and in logs, so raw
/// tokens never leave the process.
pub fn fingerprint(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
