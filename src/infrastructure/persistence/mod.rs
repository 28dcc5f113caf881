//! PostgreSQL repository implementations.
//!
//! Concrete implementations of the domain repository traits using SQLx.
//! Queries are runtime-checked rather than macro-checked: the object lookup
//! targets a table and column chosen per deep-link configuration, which
//! cannot be expressed with compile-time verified statements.
//!
//! # Repositories
//!
//! - [`PgDeepLinkRepository`] - Deep-link configuration lookup
//! - [`PgObjectRepository`] - Dynamic exact-match object lookup
//! - [`PgPendingLinkRepository`] - Pending-link clearing and creation
//! - [`PgSessionStore`] - Session lookup and guest creation

pub mod pg_deep_link_repository;
pub mod pg_object_repository;
pub mod pg_pending_link_repository;
pub mod pg_session_store;

pub use pg_deep_link_repository::PgDeepLinkRepository;
pub use pg_object_repository::PgObjectRepository;
pub use pg_pending_link_repository::PgPendingLinkRepository;
pub use pg_session_store::PgSessionStore;
