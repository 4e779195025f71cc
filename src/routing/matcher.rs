//! Route matching logic.
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - Only the path is compared; the query string never affects a match
//! - No regex to guarantee O(n) matching

/// Matches the request path prefix.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Returns true if `path` starts with this prefix.
    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.prefix)
    }

    /// Returns true if `path` is the prefix itself, ignoring a trailing slash on the prefix.
    pub fn is_bare(&self, path: &str) -> bool {
        let bare = self.prefix.trim_end_matches('/');
        !bare.is_empty() && path == bare
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}
