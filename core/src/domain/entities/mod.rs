//! Domain entities representing core business objects.

pub mod token;
pub mod user;


// Re-export commonly used types
pub use token::{Claims, TokenKind, TokenPair, VerifiedToken, JWT_ISSUER, TOKEN_TYPE_BEARER};
pub use user::{normalize_email, User, UserRole};
