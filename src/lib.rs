//! Admin Relay Library
//!
//! A static file server that relays admin and API traffic to one local
//! backend, rewriting headers, cookies and redirects on the way back.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod security;

pub use config::schema::RelayConfig;
pub use error::RelayError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
