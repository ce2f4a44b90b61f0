//! Command implementations.
//!
//! Each command takes an already loaded [`Config`] and returns what should
//! be printed, leaving stdout handling to `main`.

use anyhow::{Context, Result};
use noodle_agent::{build_provider, FeedbackResponder};
use noodle_common::{ClassificationResult, Config, Error};
use noodle_trend::{PlotRequest, SentimentPlotter};
use std::path::{Path, PathBuf};

use crate::cli::{Cli, PlotArgs, RespondArgs};

/// Load configuration for this invocation.
///
/// File, then environment, then command-line flags; the result is validated.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load_with_env(cli.config.as_deref())?;
    if let Some(level) = &cli.log_level {
        config.observability.log_level.clone_from(level);
    }
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Classify a review and return the text to print.
pub async fn respond(config: &Config, args: &RespondArgs) -> Result<String> {
    if args.text.trim().is_empty() {
        return Err(Error::InvalidInput("review text is empty".into()).into());
    }

    let provider = build_provider(&config.llm)?;
    let model = args
        .model
        .clone()
        .unwrap_or_else(|| config.llm.default_model.clone());
    tracing::debug!(%model, chars = args.text.len(), "Classifying review");
    let responder =
        FeedbackResponder::new(provider, model).with_temperature(config.llm.temperature);

    let result = responder
        .respond(&args.text)
        .await
        .context("Failed to classify review")?;
    format_classification(&result, args.json)
}

/// Render a classification for stdout.
pub fn format_classification(result: &ClassificationResult, json: bool) -> Result<String> {
    if json {
        return serde_json::to_string(result).context("Failed to serialize classification");
    }
    Ok(format!(
        "Sentiment: {}\nReply: {}",
        result.sentiment, result.reply
    ))
}

/// Plot the sentiment trend and return the written chart path.
pub fn plot(config: &Config, args: &PlotArgs) -> Result<PathBuf> {
    let mut trend = config.trend.clone();
    if let Some(data) = &args.data {
        trend.data_path.clone_from(data);
    }
    if let Some(dir) = &args.output_dir {
        trend.output_dir.clone_from(dir);
    }
    if let Some(format) = args.format {
        trend.format = format.into();
    }

    let request = PlotRequest {
        range: args.range.clone(),
        start: args.start.clone(),
        end: args.end.clone(),
        chart: args.chart.map(Into::into),
    };

    tracing::debug!(?request, data = %trend.data_path.display(), "Plotting sentiment trend");
    SentimentPlotter::new(trend)
        .plot_sentiment_trend(&request)
        .map_err(anyhow::Error::from)
}

/// Line printed after a successful plot.
pub fn saved_message(path: &Path) -> String {
    format!("Saved plot to: {}", path.display())
}
