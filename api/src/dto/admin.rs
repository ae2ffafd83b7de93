use serde::{Deserialize, Serialize};

use tm_core::services::backend::PrimaryStatus;

/// Degradation report for operators
#[derive(Debug, Clone, Serialize)]
pub struct SecurityStatusResponse {
    /// State of the shared revocation cache
    pub revocation_cache: PrimaryStatus,
    /// Revocations held only by this process
    pub local_revocations: usize,
    pub rate_limit: RateLimitStatusView,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitStatusView {
    pub enabled: bool,
    pub max_requests: u64,
    pub window_seconds: u64,
    /// Counter backend in use; absent when every request passes unmetered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,
    pub skip_paths: Vec<String>,
}
