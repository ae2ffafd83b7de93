//! Type definitions shared across the API surface

pub mod response;

pub use response::{ApiResponse, HealthResponse, HealthStatus, ServiceHealth};
