//! Error responses.
//!
//! Three situations end up here: the backend answered with a redirect or an
//! error status, the backend could not be reached at all, or something went
//! wrong locally. Each is answered with a complete HTTP response.

use axum::body::Bytes;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Json, Response};
use serde_json::json;

use crate::config::FallbackConfig;
use crate::http::backend::BackendOrigin;
use crate::http::response::{rewrite_locations, BackendResponse, OutboundResponse};

const UNREACHABLE_MESSAGE: &str = "Cannot connect to admin server";

/// Statuses relayed through [`relay_backend_error`].
pub fn is_backend_error(status: StatusCode) -> bool {
    status.is_client_error()
        || status.is_server_error()
        || matches!(status.as_u16(), 301 | 302 | 303 | 307 | 308)
}

/// Relay a redirect or error status, keeping only `Location` and `Set-Cookie`.
pub fn relay_backend_error(backend: BackendResponse, origin: &BackendOrigin) -> OutboundResponse {
    let mut headers = HeaderMap::new();
    for name in [header::LOCATION, header::SET_COOKIE] {
        for value in backend.headers.get_all(&name) {
            headers.append(name.clone(), value.clone());
        }
    }
    rewrite_locations(&mut headers, origin);

    let status = backend.status;
    let body = if backend.body.is_empty() && !status.is_redirection() {
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/html; charset=utf-8"),
        );
        Bytes::from(error_page(status))
    } else {
        backend.body
    };

    OutboundResponse { status, headers, body }
}

/// Response for a backend that refused, timed out, or dropped the connection.
pub fn backend_unreachable(path: &str, config: &FallbackConfig) -> Response {
    let wants_json = config.json_prefixes.iter().any(|p| path.starts_with(p.as_str()));

    if wants_json {
        let body = json!({
            "error": UNREACHABLE_MESSAGE,
            "login": config.login_path,
        });
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
    }

    let page = format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Admin Server Error</title></head>\n<body>\n\
         <h1>Admin Server Error</h1>\n\
         <p>{}. Please make sure the admin server is running.</p>\n\
         <p><a href=\"{}\">Try Login</a></p>\n\
         </body>\n</html>\n",
        UNREACHABLE_MESSAGE,
        escape_html(&config.login_path),
    );
    (StatusCode::INTERNAL_SERVER_ERROR, Html(page)).into_response()
}

/// Generic response for local failures.
pub fn internal_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
}

fn error_page(status: StatusCode) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Admin Server Error</title></head>\n<body>\n\
         <h1>Admin Server Error ({})</h1>\n\
         <p>{}</p>\n\
         </body>\n</html>\n",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown error"),
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
