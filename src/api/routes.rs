//! Deep-link route configuration.

use crate::api::handlers::{deeplink_handler, deeplink_root_handler};
use crate::state::AppState;
use axum::{routing::get, Router};

/// Routes for the deep-link handler, mounted under `mount_path`.
///
/// # Endpoints
///
/// - `GET <mount>`          - Empty deep-link name (session still resolved)
/// - `GET <mount>/{*path}`  - Deep-link resolution
pub fn deeplink_routes(mount_path: &str) -> Router<AppState> {
    Router::new()
        .route(mount_path, get(deeplink_root_handler))
        .route(&format!("{mount_path}/{{*path}}"), get(deeplink_handler))
}
