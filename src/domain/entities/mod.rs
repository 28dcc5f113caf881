//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic.
//!
//! # Entity Types
//!
//! - [`DeepLink`] - A named deep-link configuration, owned by the operator
//! - [`PendingLink`] - A recorded navigation target awaiting client-side consumption
//! - [`Session`] - A caller session read from the external session store
//!
//! # Design Pattern
//!
//! Creation inputs get their own structs ([`NewPendingLink`]); read-only
//! entities such as [`DeepLink`] do not, since this service never writes them.

pub mod deep_link;
pub mod pending_link;
pub mod session;

pub use deep_link::DeepLink;
pub use pending_link::{NewPendingLink, PendingLink};
pub use session::Session;
