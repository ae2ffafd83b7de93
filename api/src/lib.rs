//! # TaskMaster API
//!
//! actix-web surface of the security pipeline: the rate limit and
//! authentication filters, the session lifecycle routes and the binary's
//! wiring helpers.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use app::create_app;
pub use state::AppState;
