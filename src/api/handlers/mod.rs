//! HTTP request handlers.

pub mod deeplink;
pub mod health;

pub use deeplink::{deeplink_handler, deeplink_root_handler};
pub use health::health_handler;
