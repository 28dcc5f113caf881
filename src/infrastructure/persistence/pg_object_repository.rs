//! PostgreSQL implementation of the dynamic object lookup.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::repositories::ObjectRepository;
use crate::error::AppError;
use crate::utils::identifier::validate_identifier;

/// PostgreSQL repository resolving deep-link object arguments.
///
/// The target table and column come from operator configuration, so they are
/// interpolated into the statement after identifier validation; only the
/// looked-up value travels as a bind parameter. The object table is expected
/// to expose a `BIGINT` primary key named `id`.
pub struct PgObjectRepository {
    pool: Arc<PgPool>,
}

impl PgObjectRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ObjectRepository for PgObjectRepository {
    async fn find_ids_by_attribute(
        &self,
        object_type: &str,
        attribute: &str,
        value: &str,
    ) -> Result<Vec<i64>, AppError> {
        validate_identifier(object_type)?;
        validate_identifier(attribute)?;

        let statement = format!(
            r#"SELECT id FROM "{object_type}" WHERE "{attribute}" = $1"#
        );

        let ids = sqlx::query_scalar::<_, i64>(&statement)
            .bind(value)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(ids)
    }
}
