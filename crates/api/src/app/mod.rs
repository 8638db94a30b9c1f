//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: repository/use-case/mediator wiring
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs and mapping to/from domain types
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use catalog_infra::config::AppConfig;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router around already-wired services.
pub fn build_app(services: AppServices) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api", routes::router())
        .layer(Extension(Arc::new(services)))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

/// Wire services from configuration and build the router (used by `main.rs`).
pub async fn build_app_from_config(config: &AppConfig) -> anyhow::Result<Router> {
    let services = AppServices::from_config(config).await?;
    Ok(build_app(services))
}
