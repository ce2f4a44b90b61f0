//! Configuration management for the feedback agents.
//!
//! The CLI reads a single JSON file, by default `~/.steamnoodles/config.json`.
//! A missing file means "all defaults".
//!
//! # Configuration Priority
//!
//! 1. Command-line flags (applied by the CLI after loading)
//! 2. Environment variables
//! 3. Explicit config file values
//! 4. Default values
//!
//! # Environment Variable Mapping
//!
//! - `OPENAI_API_KEY` → llm.api_key
//! - `OPENAI_BASE_URL` → llm.base_url
//! - `NOODLE_MODEL` → llm.default_model
//! - `NOODLE_TEMPERATURE` → llm.temperature (ignored outside 0.0..=2.0)
//! - `NOODLE_DATA_PATH` → trend.data_path
//! - `NOODLE_OUTPUT_DIR` → trend.output_dir
//! - `NOODLE_LOG_LEVEL` → observability.log_level
//! - `NOODLE_LOG_FORMAT` → observability.log_format

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Get the configuration directory path.
pub fn config_dir() -> PathBuf {
    directories::UserDirs::new().map_or_else(
        || PathBuf::from(".steamnoodles"),
        |dirs| dirs.home_dir().join(".steamnoodles"),
    )
}

/// Get the configuration file path.
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

// ============================================================================
// LLM Configuration
// ============================================================================

/// Chat-completion provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Provider name. Only "openai" (and OpenAI-compatible endpoints) is wired up.
    #[serde(default = "default_provider")]
    pub provider: String,

    /// API key; usually supplied through `OPENAI_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the chat-completions API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model used when the CLI does not name one.
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Sampling temperature for classification.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_key: None,
            base_url: default_base_url(),
            default_model: default_model(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_provider() -> String {
    "openai".into()
}

fn default_base_url() -> String {
    "https://api.openai.com".into()
}

fn default_model() -> String {
    "gpt-4o-mini".into()
}

fn default_temperature() -> f64 {
    0.2
}

fn default_timeout_secs() -> u64 {
    120
}

// ============================================================================
// Trend Configuration
// ============================================================================

/// Chart style for the trend plot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
        })
    }
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "line" => Ok(ChartKind::Line),
            "bar" => Ok(ChartKind::Bar),
            other => Err(format!("unknown chart kind: {other} (expected line or bar)")),
        }
    }
}

/// Image encoding of the rendered chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Svg,
}

impl ImageFormat {
    /// File extension without the dot.
    pub const fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

impl FromStr for ImageFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "svg" => Ok(ImageFormat::Svg),
            other => Err(format!("unknown image format: {other} (expected png or svg)")),
        }
    }
}

/// Dataset location and chart output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendConfig {
    /// CSV file with `timestamp`, `text` and `sentiment` columns.
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,

    /// Directory charts are written to. Created on demand.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Chart style used when a plot request does not name one.
    #[serde(default)]
    pub chart: ChartKind,

    /// Image encoding.
    #[serde(default)]
    pub format: ImageFormat,

    /// Image width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Image height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            output_dir: default_output_dir(),
            chart: ChartKind::default(),
            format: ImageFormat::default(),
            width: default_width(),
            height: default_height(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data").join("reviews.csv")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("outputs")
}

fn default_width() -> u32 {
    960
}

fn default_height() -> u32 {
    720
}

// ============================================================================
// Observability Configuration
// ============================================================================

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Base log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// "pretty" or "json"
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration for the feedback agents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// LLM provider settings
    #[serde(default)]
    pub llm: LlmConfig,

    /// Trend plotting settings
    #[serde(default)]
    pub trend: TrendConfig,

    /// Logging settings
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from the default path.
    pub fn load() -> Result<Self> {
        let path = config_path();
        if !path.exists() {
            tracing::debug!("Config file not found, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Load configuration (default path unless `path` is given) with
    /// environment variable overrides applied.
    pub fn load_with_env(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::load_from(p)?,
            None => Self::load()?,
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// Empty values are ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get("OPENAI_API_KEY") {
            self.llm.api_key = Some(key);
        }
        if let Some(url) = get("OPENAI_BASE_URL") {
            self.llm.base_url = url;
        }
        if let Some(model) = get("NOODLE_MODEL") {
            self.llm.default_model = model;
        }
        if let Some(temp) = get("NOODLE_TEMPERATURE").and_then(|t| t.parse::<f64>().ok()) {
            if (0.0..=2.0).contains(&temp) {
                self.llm.temperature = temp;
            }
        }
        if let Some(path) = get("NOODLE_DATA_PATH") {
            self.trend.data_path = PathBuf::from(path);
        }
        if let Some(dir) = get("NOODLE_OUTPUT_DIR") {
            self.trend.output_dir = PathBuf::from(dir);
        }
        if let Some(level) = get("NOODLE_LOG_LEVEL") {
            self.observability.log_level = level;
        }
        if let Some(format) = get("NOODLE_LOG_FORMAT") {
            self.observability.log_format = format;
        }
    }

    /// API key for the configured provider, if any.
    pub fn api_key(&self) -> Option<&str> {
        self.llm.api_key.as_deref().filter(|k| !k.is_empty())
    }
}
