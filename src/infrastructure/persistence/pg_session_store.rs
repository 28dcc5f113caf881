//! PostgreSQL implementation of the session store.

use async_trait::async_trait;
use rand::distr::Alphanumeric;
use rand::Rng;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::Session;
use crate::domain::repositories::SessionStore;
use crate::error::AppError;

/// Length of generated session identifiers.
const SESSION_ID_LENGTH: usize = 32;

/// PostgreSQL-backed session store.
///
/// Guest sessions get a random alphanumeric identifier and a `guest-<prefix>`
/// user name derived from it.
pub struct PgSessionStore {
    pool: Arc<PgPool>,
}

impl PgSessionStore {
    /// Creates a new store with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    fn generate_session_id() -> String {
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(SESSION_ID_LENGTH)
            .map(char::from)
            .collect()
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn find(&self, session_id: &str) -> Result<Option<Session>, AppError> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            SELECT id, user_name, is_anonymous
            FROM sessions
            WHERE id = $1
            "#,
        )
        .bind(session_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(session)
    }

    async fn create_guest(&self) -> Result<Session, AppError> {
        let id = Self::generate_session_id();
        let user_name = format!("guest-{}", &id[..8].to_ascii_lowercase());

        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (id, user_name, is_anonymous)
            VALUES ($1, $2, TRUE)
            RETURNING id, user_name, is_anonymous
            "#,
        )
        .bind(&id)
        .bind(&user_name)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(session)
    }
}
