//! Terminal navigation decision produced by the resolver.

/// The single output of the resolution core visible to the transport layer.
///
/// Every inbound deep-link request ends in exactly one of these. All internal
/// failures (unknown or ambiguous configuration, object resolution misses,
/// persistence errors) fold into [`Decision::Serve404`]; nothing propagates
/// to the transport as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Serve the login page. Produced when no session exists and guest login
    /// is disabled, or when an anonymous session hits a deep link that does
    /// not allow guests.
    ServeLogin,
    /// Route the anonymous caller through the configured SSO handler.
    ServeSso,
    /// The request cannot be completed; serve a 404.
    Serve404,
    /// Access granted and the pending link recorded; serve the named
    /// application shell page.
    ServeIndex(String),
}
