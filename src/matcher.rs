//! Request path matching for the preview-enabled route.

/// Matches request paths against the configured route prefix and extracts
/// the post identifier.
#[derive(Debug, Clone)]
pub struct PathMatcher {
    /// Prefix without trailing slash, e.g. "/post".
    prefix: String,
}

impl PathMatcher {
    pub fn new(prefix: impl Into<String>) -> Self {
        let mut prefix = prefix.into();
        while prefix.ends_with('/') {
            prefix.pop();
        }
        Self { prefix }
    }

    /// Extract the post identifier if `path` falls under the prefix.
    ///
    /// The identifier is percent-decoded and otherwise opaque. `None` means
    /// the path is not in scope for preview rendering; it is a normal
    /// outcome, not a failure.
    pub fn post_id(&self, path: &str) -> Option<String> {
        let rest = path.strip_prefix(self.prefix.as_str())?;
        let rest = rest.strip_prefix('/')?;
        if rest.is_empty() {
            return None;
        }

        let decoded = match urlencoding::decode(rest) {
            Ok(cow) => cow.into_owned(),
            // Percent sequences that decode to invalid UTF-8: keep the raw
            // token as the identifier.
            Err(_) => rest.to_string(),
        };

        if decoded.is_empty() { None } else { Some(decoded) }
    }
}
