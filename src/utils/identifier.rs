//! Lookup-safe SQL identifier validation.
//!
//! The object lookup query names its table and column at runtime from
//! operator-provided deep-link configuration. Identifiers are interpolated
//! into the statement (bind parameters cannot carry identifiers), so they are
//! restricted to a conservative charset first.

use crate::error::AppError;
use serde_json::json;

/// Validates that `name` is usable as a SQL identifier in the dynamic
/// object-lookup query.
///
/// # Rules
///
/// - Non-empty, at most 63 characters (PostgreSQL identifier limit)
/// - First character: ASCII letter or underscore
/// - Remaining characters: ASCII letters, digits, or underscores
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_identifier(name: &str) -> Result<(), AppError> {
    if name.is_empty() || name.len() > 63 {
        return Err(AppError::bad_request(
            "Identifier must be 1-63 characters",
            json!({ "identifier": name }),
        ));
    }

    let mut chars = name.chars();
    let first = chars.next().unwrap_or('\0');

    if !(first.is_ascii_alphabetic() || first == '_') {
        return Err(AppError::bad_request(
            "Identifier must start with a letter or underscore",
            json!({ "identifier": name }),
        ));
    }

    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(AppError::bad_request(
            "Identifier can only contain letters, digits, and underscores",
            json!({ "identifier": name }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_identifiers() {
        assert!(validate_identifier("invoices").is_ok());
        assert!(validate_identifier("Invoice").is_ok());
        assert!(validate_identifier("_private").is_ok());
        assert!(validate_identifier("order_lines2").is_ok());
    }

    #[test]
    fn test_empty_identifier() {
        assert!(validate_identifier("").is_err());
    }

    #[test]
    fn test_leading_digit() {
        assert!(validate_identifier("2invoices").is_err());
    }

    #[test]
    fn test_injection_characters_rejected() {
        assert!(validate_identifier("invoices; DROP TABLE users").is_err());
        assert!(validate_identifier("invoices\"").is_err());
        assert!(validate_identifier("a.b").is_err());
        assert!(validate_identifier("a-b").is_err());
    }

    #[test]
    fn test_length_limit() {
        let long = "a".repeat(64);
        assert!(validate_identifier(&long).is_err());
        let ok = "a".repeat(63);
        assert!(validate_identifier(&ok).is_ok());
    }
}
