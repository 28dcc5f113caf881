//! Trait for the external session store.

use crate::domain::entities::Session;
use crate::error::AppError;
use async_trait::async_trait;

/// Session lookup and guest-session creation.
///
/// Sessions are owned by the store; this service reads them and, when guest
/// login is enabled, asks the store to mint an anonymous one. Thread safety
/// of the underlying store is the implementation's responsibility.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgSessionStore`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Looks up a session by the identifier carried in the request cookie.
    ///
    /// Returns `Ok(None)` when the identifier is unknown or expired.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find(&self, session_id: &str) -> Result<Option<Session>, AppError>;

    /// Creates a fresh anonymous guest session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create_guest(&self) -> Result<Session, AppError>;
}
