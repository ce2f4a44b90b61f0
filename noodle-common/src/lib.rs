//! Noodle Common - Shared types, configuration and utilities for the SteamNoodles feedback agents.
//!
//! This crate provides:
//! - The canonical sentiment label and its normalization rule
//! - The classification result shared by the agent and the CLI
//! - Configuration types and loading
//! - Configuration validation
//! - Error types and handling utilities
//! - Logging setup

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod logging;
pub mod sentiment;
pub mod validation;

pub use config::{ChartKind, Config, ImageFormat, LlmConfig, ObservabilityConfig, TrendConfig};
pub use error::{Error, Result};
pub use sentiment::{ClassificationResult, Sentiment, FALLBACK_REPLY};
pub use validation::{Validate, ValidationError, ValidationResult};

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::config::{ChartKind, Config, ImageFormat, LlmConfig, TrendConfig};
    pub use crate::error::{Error, Result};
    pub use crate::logging::init_logging;
    pub use crate::sentiment::{ClassificationResult, Sentiment};
    pub use crate::validation::{Validate, ValidationError};
}
