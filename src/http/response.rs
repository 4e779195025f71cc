//! Response handling and transformation.
//!
//! # Responsibilities
//! - Transform the backend response for the client
//! - Strip hop-by-hop headers
//! - Rewrite redirects into the backend to relay-relative paths
//! - Add `Access-Control-Allow-Origin` when enabled
//!
//! # Design Decisions
//! - `Set-Cookie` passes through verbatim, domain and path untouched
//! - Status and body bytes are copied unchanged

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::http::backend::BackendOrigin;
use crate::security::headers::filtered_copy;

/// Fully buffered response received from the backend.
#[derive(Debug, Clone)]
pub struct BackendResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Response sent back to the caller.
#[derive(Debug, Clone)]
pub struct OutboundResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl IntoResponse for OutboundResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

/// Knobs for successful relays.
#[derive(Debug, Clone, Copy)]
pub struct RewriteOptions {
    pub cors_allow_any_origin: bool,
}

/// Turn a backend response into the response relayed to the caller.
pub fn rewrite_response(
    backend: BackendResponse,
    origin: &BackendOrigin,
    options: RewriteOptions,
) -> OutboundResponse {
    let mut headers = filtered_copy(&backend.headers);
    rewrite_locations(&mut headers, origin);

    if options.cors_allow_any_origin {
        headers
            .entry(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .or_insert(HeaderValue::from_static("*"));
    }

    OutboundResponse {
        status: backend.status,
        headers,
        body: backend.body,
    }
}

/// Rewrite every `Location` value that points into the backend.
pub(crate) fn rewrite_locations(headers: &mut HeaderMap, origin: &BackendOrigin) {
    if !headers.contains_key(header::LOCATION) {
        return;
    }

    let rewritten: Vec<HeaderValue> = headers
        .get_all(header::LOCATION)
        .iter()
        .map(|value| {
            value
                .to_str()
                .ok()
                .and_then(|location| origin.rewrite_location(location))
                .and_then(|relative| HeaderValue::from_str(&relative).ok())
                .unwrap_or_else(|| value.clone())
        })
        .collect();

    headers.remove(header::LOCATION);
    for value in rewritten {
        headers.append(header::LOCATION, value);
    }
}
