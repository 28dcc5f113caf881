//! Repository trait for pending-link storage.

use crate::domain::entities::{NewPendingLink, PendingLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage interface for pending links.
///
/// The two operations are deliberately separate and are NOT executed inside
/// one transaction by the implementations: the clear-then-insert sequence and
/// its concurrency window are part of the observable contract (see
/// [`crate::application::services::PendingLinkService`]).
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgPendingLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PendingLinkRepository: Send + Sync {
    /// Deletes every pending link for the given deep link and user,
    /// regardless of which session created it. Returns the number of rows
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete_for(&self, deep_link_id: i64, user_name: &str) -> Result<u64, AppError>;

    /// Inserts a new pending link in a single statement.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors; no partial record
    /// is left behind on failure.
    async fn create(&self, new_link: NewPendingLink) -> Result<PendingLink, AppError>;
}
