//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path, query)
//!     → router.rs (route lookup)
//!     → matcher.rs (prefix comparison)
//!     → Return: Forward(backend URI) or ServeStatic(path)
//! ```
//!
//! # Design Decisions
//! - Prefixes compiled at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same input always yields the same decision
//! - First match wins (configured order)

pub mod matcher;
pub mod router;

pub use router::{RouteDecision, Router};
