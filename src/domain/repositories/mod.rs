//! Repository trait definitions for the domain layer.
//!
//! These traits abstract the external collaborators of the resolution core:
//! the deep-link configuration store, the persisted-object store, the
//! pending-link store, and the session store. Concrete implementations live
//! in `crate::infrastructure::persistence`; mock implementations are
//! auto-generated via `mockall` for testing.
//!
//! # Available Repositories
//!
//! - [`DeepLinkRepository`] - Deep-link configuration lookup
//! - [`ObjectRepository`] - Exact-match lookup of persisted objects
//! - [`PendingLinkRepository`] - Pending-link clearing and creation
//! - [`SessionStore`] - Session lookup and guest-session creation

pub mod deep_link_repository;
pub mod object_repository;
pub mod pending_link_repository;
pub mod session_store;

pub use deep_link_repository::DeepLinkRepository;
pub use object_repository::ObjectRepository;
pub use pending_link_repository::PendingLinkRepository;
pub use session_store::SessionStore;

#[cfg(test)]
pub use deep_link_repository::MockDeepLinkRepository;
#[cfg(test)]
pub use object_repository::MockObjectRepository;
#[cfg(test)]
pub use pending_link_repository::MockPendingLinkRepository;
#[cfg(test)]
pub use session_store::MockSessionStore;
