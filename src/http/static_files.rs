//! Static file serving for every path that is not forwarded.

use std::convert::Infallible;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use tower::ServiceExt;
use tower_http::services::ServeDir;

use crate::config::StaticFilesConfig;
use crate::security::headers::apply_security_headers;

/// Files under a root directory, MIME type inferred from the extension.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    dir: ServeDir,
    security_headers: bool,
}

impl StaticFiles {
    pub fn from_config(config: &StaticFilesConfig) -> Self {
        Self {
            dir: ServeDir::new(&config.root).append_index_html_on_directories(true),
            security_headers: config.security_headers,
        }
    }

    /// Serve the request from disk. Missing files yield 404.
    pub async fn serve(&self, request: Request<Body>) -> Response {
        let result: Result<_, Infallible> = self.dir.clone().oneshot(request).await;
        let mut response = match result {
            Ok(response) => response.map(Body::new),
            Err(never) => match never {},
        };

        if self.security_headers {
            apply_security_headers(response.headers_mut());
        }
        response
    }
}
