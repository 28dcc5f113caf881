//! Repository trait for deep-link configuration lookup.

use crate::domain::entities::DeepLink;
use crate::error::AppError;
use async_trait::async_trait;

/// Read-only access to the deep-link configuration store.
///
/// The store does not promise name uniqueness; callers must treat any match
/// count other than exactly one as "not configured". That contract is applied
/// by the resolver, not here, so the ambiguity can be logged with the actual
/// count.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgDeepLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeepLinkRepository: Send + Sync {
    /// Returns every configuration whose name matches exactly.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_name(&self, name: &str) -> Result<Vec<DeepLink>, AppError>;
}
