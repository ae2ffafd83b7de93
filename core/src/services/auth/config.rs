//! Configuration for the authentication service

use tm_shared::config::AuthConfig;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// bcrypt cost factor
    pub password_hash_cost: u32,
    /// Minimum accepted password length
    pub min_password_length: usize,
    /// Whether to allow registration of new users
    pub allow_registration: bool,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            password_hash_cost: bcrypt::DEFAULT_COST,
            min_password_length: 8,
            allow_registration: true,
        }
    }
}

impl From<&AuthConfig> for AuthServiceConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            password_hash_cost: config.password_hash_cost,
            ..Default::default()
        }
    }
}
