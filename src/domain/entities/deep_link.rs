//! Deep-link configuration entity.

/// A named deep-link configuration.
///
/// Maps a short identifier (the first path segment of an inbound request) to
/// an application landing page plus optional argument-resolution rules.
/// Configurations are owned by the operator and read-only to this service.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DeepLink {
    pub id: i64,
    /// Lookup key; the first path segment of the inbound request.
    pub name: String,
    /// Whether anonymous (guest) sessions may use this deep link.
    pub allow_guests: bool,
    /// When true, the remaining request path (or query string) is recorded
    /// on the pending link as a literal string argument.
    pub use_string_argument: bool,
    /// When true together with `use_string_argument`, the string argument is
    /// the raw query string instead of the remaining path.
    pub separate_get_parameters: bool,
    /// Persisted entity type to resolve the path argument against, if any.
    pub object_type: Option<String>,
    /// Attribute on `object_type` the path argument is matched against.
    pub object_attribute: Option<String>,
    /// Application shell page served once access is granted.
    pub index_page: String,
}

impl DeepLink {
    /// Returns true when this deep link resolves its path argument to a
    /// persisted object. Requires both the type and the attribute to be set
    /// and non-empty.
    pub fn has_object_argument(&self) -> bool {
        self.object_type.as_deref().is_some_and(|t| !t.is_empty())
            && self
                .object_attribute
                .as_deref()
                .is_some_and(|a| !a.is_empty())
    }
}
