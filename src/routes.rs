//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /health`           - Health check (public)
//! - `GET <mount>/{*path}`   - Deep-link resolution (public; access decided by the core)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::routing::get;
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let mount_path = state.mount_path.clone();

    let router = Router::new()
        .route("/health", get(health_handler))
        .merge(api::routes::deeplink_routes(&mount_path))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
