//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that every bind/connect address parses as a socket address
//! - Validate value ranges (buffer size > 0, default port > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ProxyConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A field that must hold `ip:port` does not.
    #[error("{field}: invalid socket address {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    /// The relay chunk size is zero.
    #[error("relay.buffer_size must be greater than zero")]
    ZeroBufferSize,

    /// The fallback upstream port is zero.
    #[error("relay.default_port must be greater than zero")]
    ZeroDefaultPort,

    /// The origin index file name is empty.
    #[error("origin.index_file must not be empty")]
    EmptyIndexFile,
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(&mut errors, "listener.bind_address", &config.listener.bind_address);
    check_address(&mut errors, "origin.bind_address", &config.origin.bind_address);

    if config.relay.buffer_size == 0 {
        errors.push(ValidationError::ZeroBufferSize);
    }
    if config.relay.default_port == 0 {
        errors.push(ValidationError::ZeroDefaultPort);
    }
    if config.origin.index_file.trim().is_empty() {
        errors.push(ValidationError::EmptyIndexFile);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&ProxyConfig::default()).is_ok());
    }

    #[test]
    fn reports_every_problem() {
        let mut config = ProxyConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.relay.buffer_size = 0;
        config.relay.default_port = 0;
        config.origin.index_file = "  ".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::ZeroBufferSize));
        assert!(errors.contains(&ValidationError::ZeroDefaultPort));
        assert!(errors.contains(&ValidationError::EmptyIndexFile));
        assert!(matches!(
            errors[0],
            ValidationError::InvalidAddress { field: "listener.bind_address", .. }
        ));
    }
}
