use std::collections::HashMap;

use actix_web::{web, HttpResponse};

use tm_core::services::backend::PrimaryStatus;
use tm_shared::types::{HealthResponse, HealthStatus, ServiceHealth};

use crate::state::AppState;

/// Handler for GET /health
///
/// A missing or unreachable cache reports `degraded`, never `unhealthy`: the
/// pipeline keeps serving on its fallback paths.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let cache = match state.revocations.primary_status().await {
        PrimaryStatus::Reachable => ServiceHealth::new(HealthStatus::Healthy, "reachable"),
        PrimaryStatus::NotConfigured => ServiceHealth::new(HealthStatus::Degraded, "not configured"),
        PrimaryStatus::Unreachable => ServiceHealth::new(HealthStatus::Degraded, "unreachable"),
    };

    let services = HashMap::from([("cache".to_string(), cache)]);
    HttpResponse::Ok().json(HealthResponse::from_services(services, env!("CARGO_PKG_VERSION")))
}
