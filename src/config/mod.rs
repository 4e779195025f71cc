//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → CLI/env overrides (PORT) applied by the binary
//!     → shared via Arc to the request handler
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults so the relay runs with no file at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    BackendConfig, FallbackConfig, ListenerConfig, ObservabilityConfig, RelayConfig,
    RoutingConfig, SecurityConfig, StaticFilesConfig,
};
pub use validation::{validate_config, ValidationError};
