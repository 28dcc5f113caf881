//! HTTP server initialization and runtime setup.
//!
//! Handles the database connection, migrations, state wiring, and the Axum
//! server lifecycle.

use crate::application::services::AccessPolicy;
use crate::config::Config;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::extract::Request;
use axum::ServiceExt;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Schema migrations
/// - Repository and resolver wiring
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if the database connection, migration, bind, or server
/// runtime fails.
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let policy = AccessPolicy {
        guest_login_enabled: config.enable_guest_login,
        sso_configured: config.sso_handler_location.is_some(),
    };

    let state = AppState::new(
        pool,
        policy,
        config.mount_path.clone(),
        config.sso_handler_location.clone(),
        PathBuf::from(&config.web_root),
    );

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;

    Ok(())
}
