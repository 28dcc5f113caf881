//! Pending-link entity: a recorded navigation target awaiting consumption.

use chrono::{DateTime, Utc};

/// A per-user, per-deep-link record holding the resolved navigation target.
///
/// Created when a deep-link request is granted access; consumed (and deleted)
/// by client-side logic outside this service. At most one pending link exists
/// per `(deep_link_id, user_name)` pair — enforced by deleting all existing
/// matches before inserting, not by a storage-level uniqueness constraint.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PendingLink {
    pub id: i64,
    pub deep_link_id: i64,
    pub user_name: String,
    /// Literal string argument: the remaining request path or the query
    /// string, depending on the deep-link configuration. `None` when the
    /// configuration does not use a string argument.
    pub string_argument: Option<String>,
    /// Identifier of the resolved persisted object, when the configuration
    /// names an object type.
    pub object_argument_id: Option<i64>,
    /// Session the object argument was resolved for; set only together with
    /// `object_argument_id`.
    pub session_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input data for creating a new pending link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPendingLink {
    pub deep_link_id: i64,
    pub user_name: String,
    pub string_argument: Option<String>,
    pub object_argument_id: Option<i64>,
    pub session_id: Option<String>,
}
