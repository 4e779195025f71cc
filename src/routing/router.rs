//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store compiled forward prefixes
//! - Decide between forwarding and static serving
//! - Build the backend target URI for forwarded paths
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) path prefix scan (acceptable for a handful of prefixes)
//! - Forward prefixes checked in configured order; static is the fallback

use axum::http::Uri;

use crate::config::RoutingConfig;
use crate::error::RelayError;
use crate::http::backend::BackendOrigin;
use crate::routing::matcher::PathPrefixMatcher;

/// Outcome of routing a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Serve `path` from the static root.
    ServeStatic(String),
    /// Forward to this absolute backend URI.
    Forward(Uri),
}

/// Path router compiled from configuration.
#[derive(Debug, Clone)]
pub struct Router {
    matchers: Vec<PathPrefixMatcher>,
    origin: BackendOrigin,
    append_query_to_bare_prefix: bool,
}

impl Router {
    pub fn from_config(config: &RoutingConfig, origin: BackendOrigin) -> Self {
        Self {
            matchers: config
                .forward_prefixes
                .iter()
                .map(PathPrefixMatcher::new)
                .collect(),
            origin,
            append_query_to_bare_prefix: config.append_query_to_bare_prefix,
        }
    }

    /// Route an inbound request URI.
    pub fn decide(&self, uri: &Uri) -> Result<RouteDecision, RelayError> {
        let path = uri.path();

        let Some(matcher) = self.matchers.iter().find(|m| m.matches(path)) else {
            return Ok(RouteDecision::ServeStatic(path.to_string()));
        };

        let mut target = uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| path.to_string());

        if self.append_query_to_bare_prefix && uri.query().is_none() && matcher.is_bare(path) {
            target.push('?');
        }

        tracing::trace!(prefix = matcher.prefix(), forward_to = %target, "Forward prefix matched");
        self.origin.target_uri(&target).map(RouteDecision::Forward)
    }

    pub fn origin(&self) -> &BackendOrigin {
        &self.origin
    }
}
