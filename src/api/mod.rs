//! HTTP layer translating transport requests into core operations.
//!
//! # Modules
//!
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing middleware
//! - [`routes`] - Route configuration

pub mod handlers;
pub mod middleware;
pub mod routes;
