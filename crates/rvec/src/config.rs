#![forbid(unsafe_code)]

//! Construction-time configuration for [`ReactiveVec`](crate::ReactiveVec).
//!
//! Configuration is deterministic and env-overridable. Parsing never fails
//! hard: invalid values keep their defaults and are reported as
//! [`ConfigError`]s in the returned [`ConfigParse`].
//!
//! # Environment Variables
//! - `RVEC_INITIAL_CAPACITY` (usize)
//! - `RVEC_TRACE_EVENTS` (bool)

use std::env;
use std::fmt;

const ENV_INITIAL_CAPACITY: &str = "RVEC_INITIAL_CAPACITY";
const ENV_TRACE_EVENTS: &str = "RVEC_TRACE_EVENTS";

/// Upper bound accepted by [`ReactiveVecConfig::validate`] for
/// `initial_capacity`.
pub const MAX_INITIAL_CAPACITY: usize = 1 << 28;

/// Configuration applied when a vector is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactiveVecConfig {
    /// Capacity reserved up front. Applying it never emits `Reserved`.
    /// Default: 0.
    pub initial_capacity: usize,
    /// Log every emitted event at `trace` level. Default: false.
    pub trace_events: bool,
}

impl Default for ReactiveVecConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 0,
            trace_events: false,
        }
    }
}

impl ReactiveVecConfig {
    /// Set the capacity reserved at construction.
    #[must_use]
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Enable or disable per-event trace logging.
    #[must_use]
    pub fn with_trace_events(mut self, enabled: bool) -> Self {
        self.trace_events = enabled;
        self
    }

    /// Parse config from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with_diagnostics().config
    }

    /// Parse config from environment variables and return diagnostics.
    #[must_use]
    pub fn from_env_with_diagnostics() -> ConfigParse {
        from_env_with(|key| env::var(key).ok())
    }

    /// Validate config constraints and return all violations.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();
        if self.initial_capacity > MAX_INITIAL_CAPACITY {
            errors.push(ConfigError::new(
                "initial_capacity",
                self.initial_capacity.to_string(),
                format!("must be at most {MAX_INITIAL_CAPACITY}"),
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Configuration parse diagnostics (env + validation).
#[derive(Debug, Clone)]
pub struct ConfigParse {
    pub config: ReactiveVecConfig,
    pub errors: Vec<ConfigError>,
}

/// Configuration error with field context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub field: &'static str,
    pub value: String,
    pub message: String,
}

impl ConfigError {
    fn new(field: &'static str, value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Build a config from an arbitrary key lookup. `from_env` passes
/// `std::env::var`; tests pass a map.
pub fn from_env_with<F>(mut get: F) -> ConfigParse
where
    F: FnMut(&str) -> Option<String>,
{
    let mut config = ReactiveVecConfig::default();
    let mut errors = Vec::new();

    if let Some(value) = get(ENV_INITIAL_CAPACITY) {
        match parse_usize(&value) {
            Some(parsed) => config.initial_capacity = parsed,
            None => errors.push(ConfigError::new(
                "initial_capacity",
                value,
                "expected non-negative integer",
            )),
        }
    }

    if let Some(value) = get(ENV_TRACE_EVENTS) {
        match parse_bool(&value) {
            Some(parsed) => config.trace_events = parsed,
            None => errors.push(ConfigError::new(
                "trace_events",
                value,
                "expected bool (1/0/true/false)",
            )),
        }
    }

    if let Err(violations) = config.validate() {
        errors.extend(violations);
        config.initial_capacity = ReactiveVecConfig::default().initial_capacity;
    }

    for error in &errors {
        tracing::warn!(field = error.field, value = %error.value, "{}", error.message);
    }

    ConfigParse { config, errors }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_usize(value: &str) -> Option<usize> {
    value.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse(vars: &[(&str, &str)]) -> ConfigParse {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        from_env_with(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_without_env() {
        let parsed = parse(&[]);
        assert_eq!(parsed.config, ReactiveVecConfig::default());
        assert!(parsed.errors.is_empty());
    }

    #[test]
    fn reads_both_vars() {
        let parsed = parse(&[("RVEC_INITIAL_CAPACITY", "64"), ("RVEC_TRACE_EVENTS", "on")]);
        assert_eq!(parsed.config.initial_capacity, 64);
        assert!(parsed.config.trace_events);
        assert!(parsed.errors.is_empty());
    }

    #[test]
    fn invalid_values_keep_defaults_and_report() {
        let parsed = parse(&[
            ("RVEC_INITIAL_CAPACITY", "-3"),
            ("RVEC_TRACE_EVENTS", "maybe"),
        ]);
        assert_eq!(parsed.config, ReactiveVecConfig::default());
        let fields: Vec<_> = parsed.errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["initial_capacity", "trace_events"]);
    }

    #[test]
    fn oversized_capacity_fails_validation() {
        let too_big = (MAX_INITIAL_CAPACITY + 1).to_string();
        let parsed = parse(&[("RVEC_INITIAL_CAPACITY", &too_big)]);
        assert_eq!(parsed.config.initial_capacity, 0);
        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.errors[0].field, "initial_capacity");
    }

    #[test]
    fn builder_methods() {
        let config = ReactiveVecConfig::default()
            .with_initial_capacity(16)
            .with_trace_events(true);
        assert_eq!(config.initial_capacity, 16);
        assert!(config.trace_events);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn error_display() {
        let err = ConfigError::new("trace_events", "x", "expected bool");
        assert_eq!(err.to_string(), "trace_events=x (expected bool)");
    }

    #[test]
    fn bool_spellings() {
        for v in ["1", "true", "TRUE", " yes ", "on"] {
            assert_eq!(parse_bool(v), Some(true), "{v}");
        }
        for v in ["0", "false", "No", "off"] {
            assert_eq!(parse_bool(v), Some(false), "{v}");
        }
        assert_eq!(parse_bool(""), None);
    }
}
