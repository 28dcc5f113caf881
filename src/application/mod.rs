//! Application layer services implementing the resolution logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls
//! and policy evaluation. Services consume repository traits and produce the
//! terminal [`crate::domain::Decision`] for the HTTP layer.
//!
//! # Available Services
//!
//! - [`services::resolver_service::ResolverService`] - Request resolution core
//! - [`services::pending_link_service::PendingLinkService`] - Pending-link clearing and creation

pub mod services;
