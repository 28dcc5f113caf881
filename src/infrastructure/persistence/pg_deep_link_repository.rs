//! PostgreSQL implementation of deep-link configuration lookup.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::DeepLink;
use crate::domain::repositories::DeepLinkRepository;
use crate::error::AppError;

/// PostgreSQL repository for deep-link configurations.
///
/// `deep_links.name` deliberately carries no uniqueness constraint; the
/// exactly-one contract is applied by the resolver so duplicates surface as
/// a diagnosable "not found" instead of an insert-time error somewhere else.
pub struct PgDeepLinkRepository {
    pool: Arc<PgPool>,
}

impl PgDeepLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DeepLinkRepository for PgDeepLinkRepository {
    async fn find_by_name(&self, name: &str) -> Result<Vec<DeepLink>, AppError> {
        let configs = sqlx::query_as::<_, DeepLink>(
            r#"
            SELECT id, name, allow_guests, use_string_argument,
                   separate_get_parameters, object_type, object_attribute,
                   index_page
            FROM deep_links
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(configs)
    }
}
