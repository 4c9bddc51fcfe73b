//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Enforce the fallback-domain invariant (a missing `default` entry is a
//!   startup error, never a request-time one)
//! - Validate value ranges (redirect status, timeouts, bind address)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::{RouterConfig, FALLBACK_DOMAIN_KEY};

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("domains table has no \"{FALLBACK_DOMAIN_KEY}\" fallback entry")]
    MissingFallbackDomain,

    #[error("domain for {country:?} is empty or contains whitespace: {domain:?}")]
    InvalidDomain { country: String, domain: String },

    #[error("redirect status {0} is not one of 301, 302, 307")]
    InvalidRedirectStatus(u16),

    #[error("excluded path {0:?} does not start with '/'")]
    InvalidExcludedPath(String),

    #[error("bind address {0:?} is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("request timeout must be greater than zero")]
    ZeroRequestTimeout,
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !config.domains.contains_key(FALLBACK_DOMAIN_KEY) {
        errors.push(ValidationError::MissingFallbackDomain);
    }

    for (country, domain) in &config.domains {
        if domain.is_empty() || domain.chars().any(|c| c.is_whitespace() || c.is_control()) {
            errors.push(ValidationError::InvalidDomain {
                country: country.clone(),
                domain: domain.clone(),
            });
        }
    }

    if !matches!(config.redirect.status, 301 | 302 | 307) {
        errors.push(ValidationError::InvalidRedirectStatus(config.redirect.status));
    }

    for path in &config.excluded_paths {
        if !path.starts_with('/') {
            errors.push(ValidationError::InvalidExcludedPath(path.clone()));
        }
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
