//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate the backend base URL
//! - Validate value ranges (timeouts > 0, body limit > 0)
//! - Validate that configured paths are absolute
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;
use url::Url;

use crate::config::schema::RelayConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("backend.base_url '{url}' is invalid: {reason}")]
    BackendUrl { url: String, reason: String },

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("{field} entry '{value}' must start with '/'")]
    RelativePath { field: &'static str, value: String },

    #[error("routing.forward_prefixes must not be empty")]
    NoForwardPrefixes,
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(reason) = check_backend_url(&config.backend.base_url) {
        errors.push(ValidationError::BackendUrl {
            url: config.backend.base_url.clone(),
            reason,
        });
    }

    if config.backend.timeout_secs == 0 {
        errors.push(ValidationError::Zero { field: "backend.timeout_secs" });
    }
    if config.backend.connect_timeout_secs == 0 {
        errors.push(ValidationError::Zero { field: "backend.connect_timeout_secs" });
    }
    if config.security.max_body_size == 0 {
        errors.push(ValidationError::Zero { field: "security.max_body_size" });
    }

    if config.routing.forward_prefixes.is_empty() {
        errors.push(ValidationError::NoForwardPrefixes);
    }
    check_paths("routing.forward_prefixes", &config.routing.forward_prefixes, &mut errors);
    check_paths("fallback.json_prefixes", &config.fallback.json_prefixes, &mut errors);
    check_paths(
        "fallback.login_path",
        std::slice::from_ref(&config.fallback.login_path),
        &mut errors,
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_backend_url(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    if url.scheme() != "http" {
        return Err(format!("unsupported scheme '{}'", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err("missing host".to_string());
    }
    if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
        return Err("must be an origin without path, query or fragment".to_string());
    }
    Ok(())
}

fn check_paths(field: &'static str, values: &[String], errors: &mut Vec<ValidationError>) {
    for value in values {
        if !value.starts_with('/') {
            errors.push(ValidationError::RelativePath {
                field,
                value: value.clone(),
            });
        }
    }
}
