//! Token module for session token management
//!
//! - HS256 access and refresh token issuance
//! - Verification with a single opaque failure variant
//! - Remaining lifetime calculation used by revocation

mod codec;
mod config;


pub use codec::{fingerprint, TokenCodec};
pub use config::TokenServiceConfig;
