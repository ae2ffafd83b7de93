use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::{info, warn};

use tm_api::{create_app, telemetry, AppState};
use tm_core::repositories::InMemoryUserRepository;
use tm_infra::cache::connect_optional;
use tm_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;
    telemetry::init(&config.logging)?;

    info!(environment = %config.environment, "Starting TaskMaster API server");
    if config.auth.jwt.is_using_default_secret() {
        warn!("Using the development signing secret; set TASKMASTER__AUTH__JWT__SECRET");
    }

    let cache = connect_optional(&config.cache).await;
    let state = web::Data::new(AppState::build(
        &config,
        Arc::new(InMemoryUserRepository::new()),
        cache,
    ));

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    info!("Server stopped");
    Ok(())
}
