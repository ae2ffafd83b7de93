//! Revocation of session tokens on logout

mod store;

#[cfg(test)]
mod tests;

pub use store::{Revocation, RevocationStore, REVOCATION_KEY_PREFIX, REVOCATION_MARKER};
