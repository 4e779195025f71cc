//! Request forwarding to the backend.
//!
//! # Responsibilities
//! - Generate a request ID for every inbound request
//! - Read the inbound body when `Content-Length` announces one
//! - Build the forwarded request (filtered headers, backend `Host`)
//! - Issue it to the backend under a fixed deadline
//!
//! # Design Decisions
//! - Bodies are read only when `Content-Length` is present and positive;
//!   chunked inbound bodies are not forwarded
//! - The deadline covers connect, response head and response body
//! - No idle connections are kept, so a failed forward never holds a socket

use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::{header, request::Parts, HeaderMap, HeaderValue, Method, Request, Uri, Version};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::config::BackendConfig;
use crate::error::{RelayError, Result};
use crate::http::backend::BackendOrigin;
use crate::http::response::BackendResponse;
use crate::security::headers::filtered_copy;

/// Header carrying the request ID, set on the way in and echoed on the way out.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRelayRequestId;

impl MakeRequestId for MakeRelayRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Read the inbound body if `Content-Length` announces a positive length.
pub async fn read_body(headers: &HeaderMap, body: Body, limit: usize) -> Result<Option<Bytes>> {
    let Some(raw) = headers.get(header::CONTENT_LENGTH) else {
        return Ok(None);
    };

    let declared = raw
        .to_str()
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .ok_or_else(|| RelayError::MalformedRequest(format!("invalid Content-Length {:?}", raw)))?;

    if declared == 0 {
        return Ok(None);
    }
    if declared > limit as u64 {
        return Err(RelayError::BodyTooLarge { limit });
    }

    let bytes = axum::body::to_bytes(body, limit)
        .await
        .map_err(|e| RelayError::LocalIo(e.to_string()))?;
    Ok(Some(bytes))
}

/// A request ready to be sent to the backend.
#[derive(Debug, Clone)]
pub struct ForwardedRequest {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

impl ForwardedRequest {
    /// Derive the forwarded request from the inbound one.
    pub fn from_inbound(
        parts: &Parts,
        body: Option<Bytes>,
        target: Uri,
        origin: &BackendOrigin,
    ) -> Self {
        let mut headers = filtered_copy(&parts.headers);
        headers.insert(header::HOST, origin.host_header().clone());

        Self {
            method: parts.method.clone(),
            uri: target,
            headers,
            body,
        }
    }

    fn into_http(self) -> Request<Body> {
        let body = match self.body {
            Some(bytes) => Body::from(bytes),
            None => Body::empty(),
        };

        let mut request = Request::new(body);
        *request.method_mut() = self.method;
        *request.uri_mut() = self.uri;
        *request.version_mut() = Version::HTTP_11;
        *request.headers_mut() = self.headers;
        request
    }
}

/// HTTP client bound to the backend's timing contract.
#[derive(Clone)]
pub struct Forwarder {
    client: Client<HttpConnector, Body>,
    timeout: Duration,
}

impl Forwarder {
    pub fn new(config: &BackendConfig) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(config.connect_timeout_secs)));

        let client = Client::builder(TokioExecutor::new())
            .pool_max_idle_per_host(0)
            .build(connector);

        Self {
            client,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Send the request and buffer the backend's full response.
    pub async fn send(&self, request: ForwardedRequest) -> Result<BackendResponse> {
        let exchange = async {
            let response = self
                .client
                .request(request.into_http())
                .await
                .map_err(|e| RelayError::BackendUnreachable(e.to_string()))?;

            let (parts, body) = response.into_parts();
            let body = axum::body::to_bytes(Body::new(body), usize::MAX)
                .await
                .map_err(|e| RelayError::BackendUnreachable(e.to_string()))?;

            Ok(BackendResponse {
                status: parts.status,
                headers: parts.headers,
                body,
            })
        };

        match tokio::time::timeout(self.timeout, exchange).await {
            Ok(result) => result,
            Err(_) => Err(RelayError::BackendUnreachable(format!(
                "no response within {}s",
                self.timeout.as_secs()
            ))),
        }
    }
}
