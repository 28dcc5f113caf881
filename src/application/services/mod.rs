//! Business logic services for the application layer.

pub mod pending_link_service;
pub mod resolver_service;

pub use pending_link_service::PendingLinkService;
pub use resolver_service::{AccessPolicy, Resolution, ResolverService};
