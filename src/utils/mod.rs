//! Utility functions for request parsing and identifier validation.
//!
//! - [`request_parser`] - Mount-relative path/query parsing into a [`request_parser::ParsedRequest`]
//! - [`identifier`] - Lookup-safe SQL identifier validation for the dynamic object query

pub mod identifier;
pub mod request_parser;
