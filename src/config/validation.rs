//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (ports nonzero, timeouts > 0)
//! - Check addresses are usable before any socket is opened
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: BridgeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use crate::config::schema::BridgeConfig;

/// A single semantic problem found in a config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g., "mpd.port").
    pub field: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn err(errors: &mut Vec<ValidationError>, field: &str, message: &str) {
    errors.push(ValidationError {
        field: field.to_string(),
        message: message.to_string(),
    });
}

/// Validate a deserialized config, collecting every problem found.
pub fn validate_config(config: &BridgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listen.host.is_empty() {
        err(&mut errors, "listen.host", "bind host must not be empty");
    }
    if config.listen.port == 0 {
        err(&mut errors, "listen.port", "listen port must be nonzero");
    }

    if config.mpd.host.is_empty() {
        err(&mut errors, "mpd.host", "backend host must not be empty");
    }
    if config.mpd.port == 0 {
        err(&mut errors, "mpd.port", "backend port must be nonzero");
    }

    if config.timeouts.connect_secs == 0 {
        err(&mut errors, "timeouts.connect_secs", "connect timeout must be nonzero");
    }
    if config.timeouts.session_secs == 0 {
        err(&mut errors, "timeouts.session_secs", "session timeout must be nonzero");
    }
    if config.timeouts.request_secs == 0 {
        err(&mut errors, "timeouts.request_secs", "request timeout must be nonzero");
    }
    if config.timeouts.session_secs > config.timeouts.request_secs {
        err(
            &mut errors,
            "timeouts.session_secs",
            "session timeout must not exceed the HTTP request timeout",
        );
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<std::net::SocketAddr>()
            .is_err()
    {
        err(
            &mut errors,
            "observability.metrics_address",
            "metrics address must be a valid socket address",
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::BridgeConfig;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&BridgeConfig::default()).is_ok());
    }

    #[test]
    fn collects_all_errors_at_once() {
        let mut config = BridgeConfig::default();
        config.listen.port = 0;
        config.mpd.host = String::new();
        config.timeouts.session_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"listen.port"));
        assert!(fields.contains(&"mpd.host"));
        assert!(fields.contains(&"timeouts.session_secs"));
    }

    #[test]
    fn session_timeout_bounded_by_request_timeout() {
        let mut config = BridgeConfig::default();
        config.timeouts.session_secs = 60;
        config.timeouts.request_secs = 30;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "timeouts.session_secs");
    }

    #[test]
    fn bad_metrics_address_rejected_only_when_enabled() {
        let mut config = BridgeConfig::default();
        config.observability.metrics_address = "not-an-address".to_string();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
