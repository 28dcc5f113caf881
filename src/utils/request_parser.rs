//! Mount-relative request parsing.
//!
//! Turns a raw path and optional query string into a structured
//! [`ParsedRequest`]. Pure function of its inputs; no external dependency.

/// A deep-link request broken into its structural parts.
///
/// One instance per request, derived purely from the mount-relative path and
/// query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
    /// First path segment; the deep-link lookup key. Empty when the
    /// mount-relative path itself is empty, which signals an immediate 404.
    pub deeplink_name: String,
    /// Second path segment, when present. Used for object resolution.
    pub path_argument: Option<String>,
    /// Everything after the first segment rejoined with `/`, with
    /// `?<query>` appended when a query string is present.
    pub remaining_path: String,
    /// The raw query string; empty when absent.
    pub query_string: String,
}

/// Parses a mount-relative path and optional query string.
///
/// The first segment is the deep-link name, the second (if any) the path
/// argument; all segments after the first are rejoined to form the remaining
/// path. Leading and trailing slashes carry no meaning and are ignored.
///
/// # Examples
///
/// ```
/// use deeplink_gateway::utils::request_parser::parse;
///
/// let req = parse("foo/bar/baz", Some("x=1"));
/// assert_eq!(req.deeplink_name, "foo");
/// assert_eq!(req.path_argument.as_deref(), Some("bar"));
/// assert_eq!(req.remaining_path, "bar/baz?x=1");
/// assert_eq!(req.query_string, "x=1");
/// ```
pub fn parse(path: &str, query: Option<&str>) -> ParsedRequest {
    let trimmed = path.trim_matches('/');
    let mut segments = trimmed.split('/');

    let deeplink_name = segments.next().unwrap_or("").to_string();
    let rest: Vec<&str> = segments.collect();

    let path_argument = rest.first().map(|s| s.to_string());

    let mut remaining_path = rest.join("/");
    if let Some(q) = query {
        remaining_path.push('?');
        remaining_path.push_str(q);
    }

    ParsedRequest {
        deeplink_name,
        path_argument,
        remaining_path,
        query_string: query.unwrap_or("").to_string(),
    }
}
