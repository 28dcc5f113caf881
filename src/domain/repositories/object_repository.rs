//! Repository trait for exact-match lookup of persisted objects.

use crate::error::AppError;
use async_trait::async_trait;

/// Typed lookup interface over the persisted-object store.
///
/// The resolution core never builds query syntax itself; it hands a
/// type/attribute/value triple to this trait and applies the exactly-one
/// contract to the returned identifiers. Callers must treat more than one
/// match identically to zero matches.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgObjectRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectRepository: Send + Sync {
    /// Returns the identifiers of all objects of `object_type` whose
    /// `attribute` equals `value`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the type or attribute name is
    /// not a lookup-safe identifier, and [`AppError::Internal`] on database
    /// errors.
    async fn find_ids_by_attribute(
        &self,
        object_type: &str,
        attribute: &str,
        value: &str,
    ) -> Result<Vec<i64>, AppError>;
}
