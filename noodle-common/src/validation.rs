//! Configuration validation.
//!
//! Checks that configured values are present and within valid ranges
//! before any command runs.

use thiserror::Error;

use crate::config::{Config, LlmConfig, ObservabilityConfig, TrendConfig};

/// Configuration validation error.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Multiple validation errors: {0:?}")]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Trait for validatable configuration sections.
pub trait Validate {
    /// Validate this configuration section.
    fn validate(&self) -> ValidationResult<()>;
}

impl Config {
    /// Validate the entire configuration.
    pub fn validate(&self) -> ValidationResult<()> {
        let mut errors: Vec<ValidationError> = [
            self.llm.validate(),
            self.trend.validate(),
            self.observability.validate(),
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect();

        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(ValidationError::Multiple(errors)),
        }
    }
}

impl Validate for LlmConfig {
    fn validate(&self) -> ValidationResult<()> {
        if self.default_model.trim().is_empty() {
            return Err(ValidationError::MissingField {
                field: "llm.default_model".into(),
            });
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidValue {
                field: "llm.temperature".into(),
                reason: format!("{} is outside 0.0..=2.0", self.temperature),
            });
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidValue {
                field: "llm.base_url".into(),
                reason: format!("{} is not an http(s) URL", self.base_url),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidValue {
                field: "llm.timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}

impl Validate for TrendConfig {
    fn validate(&self) -> ValidationResult<()> {
        if self.data_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingField {
                field: "trend.data_path".into(),
            });
        }
        if self.width < 100 || self.height < 100 {
            return Err(ValidationError::InvalidValue {
                field: "trend.width/height".into(),
                reason: format!("{}x{} is too small to draw a chart", self.width, self.height),
            });
        }
        Ok(())
    }
}

impl Validate for ObservabilityConfig {
    fn validate(&self) -> ValidationResult<()> {
        const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
        if !LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ValidationError::InvalidValue {
                field: "observability.log_level".into(),
                reason: format!("expected one of {LEVELS:?}"),
            });
        }
        if self.log_format != "pretty" && self.log_format != "json" {
            return Err(ValidationError::InvalidValue {
                field: "observability.log_format".into(),
                reason: "expected \"pretty\" or \"json\"".into(),
            });
        }
        Ok(())
    }
}
