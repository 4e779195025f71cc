//! The fixed backend origin.
//!
//! Parsed once at startup; provides the target URI for forwarded requests,
//! the `Host` header value, and `Location` rewriting for relayed redirects.

use std::str::FromStr;

use axum::http::uri::{Authority, Scheme};
use axum::http::{HeaderValue, Uri};
use url::Url;

use crate::config::ValidationError;
use crate::error::RelayError;

/// Backend `scheme://host:port` the relay forwards to.
#[derive(Debug, Clone)]
pub struct BackendOrigin {
    /// Base URL without trailing slash, e.g. `http://localhost:3000`.
    base_url: String,
    scheme: Scheme,
    authority: Authority,
    host_header: HeaderValue,
}

impl BackendOrigin {
    /// Parse a base URL such as `http://localhost:3000`.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let invalid = |reason: String| ValidationError::BackendUrl {
            url: raw.to_string(),
            reason,
        };

        let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
        let host = url
            .host_str()
            .ok_or_else(|| invalid("missing host".to_string()))?;
        let authority_str = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };

        let scheme = Scheme::from_str(url.scheme()).map_err(|e| invalid(e.to_string()))?;
        let authority = Authority::from_str(&authority_str).map_err(|e| invalid(e.to_string()))?;
        let host_header =
            HeaderValue::from_str(&authority_str).map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            base_url: raw.trim_end_matches('/').to_string(),
            scheme,
            authority,
            host_header,
        })
    }

    /// Base URL as configured, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Value sent as the `Host` header of forwarded requests.
    pub fn host_header(&self) -> &HeaderValue {
        &self.host_header
    }

    /// Absolute backend URI for an inbound path and query.
    pub fn target_uri(&self, path_and_query: &str) -> Result<Uri, RelayError> {
        Uri::builder()
            .scheme(self.scheme.clone())
            .authority(self.authority.clone())
            .path_and_query(path_and_query)
            .build()
            .map_err(|e| RelayError::MalformedRequest(e.to_string()))
    }

    /// Turn an absolute redirect into the backend into a relay-relative one.
    ///
    /// Returns `None` when the location points elsewhere and must be kept as is.
    pub fn rewrite_location(&self, location: &str) -> Option<String> {
        let rest = location.strip_prefix(self.base_url.as_str())?;
        if rest.is_empty() {
            return Some("/".to_string());
        }
        // `http://localhost:30001` must not match `http://localhost:3000`
        if rest.starts_with(['/', '?', '#']) {
            Some(rest.to_string())
        } else {
            None
        }
    }
}
