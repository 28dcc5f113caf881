#![allow(dead_code)]

use axum::Router;
use deeplink_gateway::api::routes::deeplink_routes;
use deeplink_gateway::api::handlers::health_handler;
use deeplink_gateway::application::services::AccessPolicy;
use deeplink_gateway::state::AppState;
use sqlx::PgPool;
use std::path::PathBuf;

/// Builds application state wired to the test database.
pub fn create_test_state(
    pool: PgPool,
    guest_login_enabled: bool,
    sso_handler_location: Option<&str>,
) -> AppState {
    AppState::new(
        pool,
        AccessPolicy {
            guest_login_enabled,
            sso_configured: sso_handler_location.is_some(),
        },
        "/link".to_string(),
        sso_handler_location.map(str::to_string),
        PathBuf::from("web"),
    )
}

/// Builds the router the way `routes::app_router` does, without the
/// normalize-path wrapper (axum-test serves plain routers).
pub fn test_router(state: AppState) -> Router {
    Router::new()
        .route("/health", axum::routing::get(health_handler))
        .merge(deeplink_routes("/link"))
        .with_state(state)
}

pub struct DeepLinkFixture<'a> {
    pub name: &'a str,
    pub allow_guests: bool,
    pub use_string_argument: bool,
    pub separate_get_parameters: bool,
    pub object_type: Option<&'a str>,
    pub object_attribute: Option<&'a str>,
    pub index_page: &'a str,
}

impl<'a> DeepLinkFixture<'a> {
    pub fn named(name: &'a str) -> Self {
        Self {
            name,
            allow_guests: true,
            use_string_argument: false,
            separate_get_parameters: false,
            object_type: None,
            object_attribute: None,
            index_page: "index.html",
        }
    }
}

pub async fn insert_deep_link(pool: &PgPool, fixture: DeepLinkFixture<'_>) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO deep_links
            (name, allow_guests, use_string_argument, separate_get_parameters,
             object_type, object_attribute, index_page)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id
        "#,
    )
    .bind(fixture.name)
    .bind(fixture.allow_guests)
    .bind(fixture.use_string_argument)
    .bind(fixture.separate_get_parameters)
    .bind(fixture.object_type)
    .bind(fixture.object_attribute)
    .bind(fixture.index_page)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn insert_session(pool: &PgPool, id: &str, user_name: &str, is_anonymous: bool) {
    sqlx::query("INSERT INTO sessions (id, user_name, is_anonymous) VALUES ($1, $2, $3)")
        .bind(id)
        .bind(user_name)
        .bind(is_anonymous)
        .execute(pool)
        .await
        .unwrap();
}

#[derive(sqlx::FromRow)]
pub struct PendingLinkRow {
    pub string_argument: Option<String>,
    pub object_argument_id: Option<i64>,
    pub session_id: Option<String>,
}

pub async fn pending_links_for(
    pool: &PgPool,
    deep_link_id: i64,
    user_name: &str,
) -> Vec<PendingLinkRow> {
    sqlx::query_as(
        r#"
        SELECT string_argument, object_argument_id, session_id
        FROM pending_links
        WHERE deep_link_id = $1 AND user_name = $2
        "#,
    )
    .bind(deep_link_id)
    .bind(user_name)
    .fetch_all(pool)
    .await
    .unwrap()
}

pub async fn count_pending_links(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM pending_links")
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Creates the fixture table the object-argument tests resolve against.
pub async fn create_invoices_table(pool: &PgPool) {
    sqlx::query(
        r#"
        CREATE TABLE invoices (
            id     BIGSERIAL PRIMARY KEY,
            number TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .unwrap();
}

pub async fn insert_invoice(pool: &PgPool, number: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO invoices (number) VALUES ($1) RETURNING id")
        .bind(number)
        .fetch_one(pool)
        .await
        .unwrap()
}
