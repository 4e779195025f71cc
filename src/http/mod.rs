//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing)
//!     → routing (forward prefix or static)
//!     → static_files.rs (serve from disk, security headers)
//!     → request.rs (read body, filter headers, send to backend)
//!     → response.rs (strip headers, rewrite Location, CORS)
//!     → fallback.rs (backend errors, unreachable backend, local failures)
//!     → Send to client
//! ```

pub mod backend;
pub mod fallback;
pub mod request;
pub mod response;
pub mod server;
pub mod static_files;

pub use backend::BackendOrigin;
pub use request::{ForwardedRequest, Forwarder, MakeRelayRequestId, X_REQUEST_ID};
pub use response::{BackendResponse, OutboundResponse, RewriteOptions};
pub use server::{AppState, HttpServer};
pub use static_files::StaticFiles;
