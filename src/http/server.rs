//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the relay handler as fallback
//! - Wire up middleware (tracing, request ID)
//! - Dispatch requests to the path router
//! - Forward matching requests to the backend and relay the answer
//! - Serve everything else from the static root

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{Request, Uri},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::{validate_config, ConfigError, FallbackConfig, RelayConfig};
use crate::error::RelayError;
use crate::http::backend::BackendOrigin;
use crate::http::fallback;
use crate::http::request::{read_body, ForwardedRequest, Forwarder, MakeRelayRequestId, X_REQUEST_ID};
use crate::http::response::{rewrite_response, RewriteOptions};
use crate::http::static_files::StaticFiles;
use crate::observability::metrics;
use crate::routing::{RouteDecision, Router as PathRouter};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<PathRouter>,
    pub forwarder: Forwarder,
    pub static_files: StaticFiles,
    pub fallback: Arc<FallbackConfig>,
    pub rewrite: RewriteOptions,
    pub max_body_size: usize,
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RelayConfig) -> Result<Self, ConfigError> {
        validate_config(&config).map_err(ConfigError::Validation)?;
        let origin = BackendOrigin::parse(&config.backend.base_url)
            .map_err(|e| ConfigError::Validation(vec![e]))?;

        let state = AppState {
            router: Arc::new(PathRouter::from_config(&config.routing, origin)),
            forwarder: Forwarder::new(&config.backend),
            static_files: StaticFiles::from_config(&config.static_files),
            fallback: Arc::new(config.fallback.clone()),
            rewrite: RewriteOptions {
                cors_allow_any_origin: config.security.cors_allow_any_origin,
            },
            max_body_size: config.security.max_body_size,
        };

        let router = Self::build_router(state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .fallback(relay_handler)
            .with_state(state)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRelayRequestId))
    }

    /// Run the server until a shutdown signal arrives, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            backend = %self.config.backend.base_url,
            static_root = %self.config.static_files.root,
            "HTTP server starting"
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}

/// Main relay handler.
/// Routes the request, then forwards it or serves it from disk.
async fn relay_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let method = request.method().clone();
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let decision = match state.router.decide(request.uri()) {
        Ok(decision) => decision,
        Err(e) => {
            tracing::warn!(request_id = %request_id, uri = %request.uri(), error = %e, "Cannot route request");
            metrics::record_failure(e.kind());
            let response = fallback::internal_error();
            metrics::record_request(method.as_str(), response.status().as_u16(), "invalid", start_time);
            return response;
        }
    };

    let (route, response) = match decision {
        RouteDecision::Forward(target) => {
            tracing::debug!(request_id = %request_id, method = %method, uri = %target, "Forwarding request");
            ("forward", forward(&state, request, target, &request_id).await)
        }
        RouteDecision::ServeStatic(path) => {
            tracing::debug!(request_id = %request_id, method = %method, path = %path, "Serving static file");
            ("static", state.static_files.serve(request).await)
        }
    };

    metrics::record_request(method.as_str(), response.status().as_u16(), route, start_time);
    response
}

async fn forward(state: &AppState, request: Request<Body>, target: Uri, request_id: &str) -> Response {
    let (parts, body) = request.into_parts();

    let body = match read_body(&parts.headers, body, state.max_body_size).await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Rejecting request body");
            metrics::record_failure(e.kind());
            return fallback::internal_error();
        }
    };

    let origin = state.router.origin();
    let forwarded = ForwardedRequest::from_inbound(&parts, body, target, origin);

    match state.forwarder.send(forwarded).await {
        Ok(backend) if fallback::is_backend_error(backend.status) => {
            tracing::debug!(request_id = %request_id, status = %backend.status, "Relaying backend error status");
            fallback::relay_backend_error(backend, origin).into_response()
        }
        Ok(backend) => rewrite_response(backend, origin, state.rewrite).into_response(),
        Err(e @ RelayError::BackendUnreachable(_)) => {
            tracing::error!(request_id = %request_id, backend = origin.base_url(), error = %e, "Backend unreachable");
            metrics::record_failure(e.kind());
            fallback::backend_unreachable(parts.uri.path(), &state.fallback)
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Forwarding failed");
            metrics::record_failure(e.kind());
            fallback::internal_error()
        }
    }
}
