//! Header filtering and security headers.
//!
//! # Responsibilities
//! - Strip hop-by-hop headers from forwarded requests and relayed responses
//! - Add security response headers to static responses
//!
//! # Design Decisions
//! - The hop-by-hop set is a fixed table, not derived per request
//! - `HeaderMap` stores names lowercased, so matching is case-insensitive

use axum::http::{header, HeaderMap, HeaderName, HeaderValue};

/// Headers that only apply to a single connection and are never relayed.
pub const HOP_BY_HOP: [HeaderName; 4] = [
    header::HOST,
    header::CONNECTION,
    header::CONTENT_LENGTH,
    header::TRANSFER_ENCODING,
];

/// Headers added to every static response.
pub const SECURITY_HEADERS: [(HeaderName, &str); 3] = [
    (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (header::X_FRAME_OPTIONS, "DENY"),
    (header::X_XSS_PROTECTION, "1; mode=block"),
];

/// Returns true if the header must not cross the relay.
pub fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP.contains(name)
}

/// Remove every hop-by-hop header (all values) from the map.
pub fn strip_hop_by_hop(headers: &mut HeaderMap) {
    for name in &HOP_BY_HOP {
        headers.remove(name);
    }
}

/// Copy headers into a fresh map, skipping the hop-by-hop set and keeping order.
pub fn filtered_copy(source: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::with_capacity(source.len());
    for (name, value) in source.iter() {
        if !is_hop_by_hop(name) {
            out.append(name.clone(), value.clone());
        }
    }
    out
}

/// Set the static-file security headers, replacing any existing values.
pub fn apply_security_headers(headers: &mut HeaderMap) {
    for (name, value) in SECURITY_HEADERS {
        headers.insert(name, HeaderValue::from_static(value));
    }
}
