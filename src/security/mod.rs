//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Forwarded request / relayed response:
//!     → headers.rs (strip hop-by-hop headers)
//! Static response:
//!     → headers.rs (add nosniff, frame and XSS headers)
//! ```

pub mod headers;

pub use headers::{apply_security_headers, filtered_copy, is_hop_by_hop, strip_hop_by_hop, HOP_BY_HOP};
