//! Configuration validation.
//!
//! Semantic checks on top of what serde already guarantees. Validation is
//! a pure function over the config and returns every violation, not just
//! the first.

use thiserror::Error;

use crate::config::schema::ClientConfig;
use crate::net::endpoint::Endpoint;

/// A single semantic violation in the configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("endpoint.url must be set")]
    MissingEndpoint,

    #[error("endpoint.url is invalid: {0}")]
    InvalidEndpoint(String),

    #[error("timeouts.connect_secs must be greater than zero")]
    ZeroConnectTimeout,

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("retries.max_attempts must be at least 1 when retries are enabled")]
    ZeroRetryAttempts,
}

/// Validate a configuration, collecting all violations.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.endpoint.url.is_empty() {
        errors.push(ValidationError::MissingEndpoint);
    } else if let Err(error) = Endpoint::parse(&config.endpoint.url) {
        errors.push(ValidationError::InvalidEndpoint(error.to_string()));
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroConnectTimeout);
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }
    if config.retries.enabled && config.retries.max_attempts == 0 {
        errors.push(ValidationError::ZeroRetryAttempts);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
