//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject malformed route specs before the route table is built
//! - Check value ranges and cross-field consistency
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;
use std::net::SocketAddr;

use url::Url;

use crate::config::schema::AppConfig;
use crate::routing::RoutePattern;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "server.bind_address",
            format!("'{}' is not a socket address", config.server.bind_address),
        ));
    }
    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "server.request_timeout_secs",
            "must be greater than zero",
        ));
    }

    if let Err(e) = Url::parse(&config.app.base_url) {
        errors.push(ValidationError::new(
            "app.base_url",
            format!("'{}' is not a valid URL: {}", config.app.base_url, e),
        ));
    }

    if !config.i18n.supported.contains(&config.i18n.default_language) {
        errors.push(ValidationError::new(
            "i18n.default_language",
            format!(
                "'{}' is not listed in i18n.supported",
                config.i18n.default_language
            ),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!(
                "'{}' is not a socket address",
                config.observability.metrics_address
            ),
        ));
    }

    for (i, route) in config.routes.iter().enumerate() {
        if let Err(e) = RoutePattern::validate(&route.pattern) {
            errors.push(ValidationError::new(format!("routes[{i}].pattern"), e.to_string()));
        }
        if route.controller.trim().is_empty() {
            errors.push(ValidationError::new(
                format!("routes[{i}].controller"),
                "must not be empty",
            ));
        }
        if route.action.trim().is_empty() {
            errors.push(ValidationError::new(
                format!("routes[{i}].action"),
                "must not be empty",
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
