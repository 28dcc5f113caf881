//! PostgreSQL implementation of pending-link storage.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewPendingLink, PendingLink};
use crate::domain::repositories::PendingLinkRepository;
use crate::error::AppError;

/// PostgreSQL repository for pending links.
///
/// `delete_for` and `create` are intentionally independent statements; the
/// clear-then-insert sequence runs without a transaction (see the service
/// layer for the contract).
pub struct PgPendingLinkRepository {
    pool: Arc<PgPool>,
}

impl PgPendingLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PendingLinkRepository for PgPendingLinkRepository {
    async fn delete_for(&self, deep_link_id: i64, user_name: &str) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM pending_links
            WHERE deep_link_id = $1 AND user_name = $2
            "#,
        )
        .bind(deep_link_id)
        .bind(user_name)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected())
    }

    async fn create(&self, new_link: NewPendingLink) -> Result<PendingLink, AppError> {
        let link = sqlx::query_as::<_, PendingLink>(
            r#"
            INSERT INTO pending_links
                (deep_link_id, user_name, string_argument, object_argument_id, session_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, deep_link_id, user_name, string_argument,
                      object_argument_id, session_id, created_at
            "#,
        )
        .bind(new_link.deep_link_id)
        .bind(&new_link.user_name)
        .bind(&new_link.string_argument)
        .bind(new_link.object_argument_id)
        .bind(&new_link.session_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(link)
    }
}
