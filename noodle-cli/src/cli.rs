//! Command-line surface.

use clap::{Args, Parser, Subcommand, ValueEnum};
use noodle_common::{ChartKind, ImageFormat};
use std::path::PathBuf;

/// SteamNoodles feedback agents.
#[derive(Parser, Debug)]
#[command(name = "noodle")]
#[command(version = "0.1.0")]
#[command(about = "Reply to customer reviews and plot sentiment trends.", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.steamnoodles/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a review and draft a reply
    Respond(RespondArgs),

    /// Plot review sentiment per day over a date range
    Plot(PlotArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RespondArgs {
    /// Review text
    #[arg(short, long)]
    pub text: String,

    /// Model to use (default from config)
    #[arg(long)]
    pub model: Option<String>,

    /// Print the result as a JSON object
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct PlotArgs {
    /// Natural-language range, e.g. "last 7 days" or "June 1 to June 15"
    #[arg(short, long)]
    pub range: Option<String>,

    /// Start date, used when --range is absent or not understood
    #[arg(long)]
    pub start: Option<String>,

    /// End date
    #[arg(long)]
    pub end: Option<String>,

    /// Chart style (default from config)
    #[arg(long, value_enum)]
    pub chart: Option<ChartArg>,

    /// Reviews CSV
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Directory for the chart image
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Image format (default from config)
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartArg {
    Line,
    Bar,
}

impl From<ChartArg> for ChartKind {
    fn from(arg: ChartArg) -> Self {
        match arg {
            ChartArg::Line => ChartKind::Line,
            ChartArg::Bar => ChartKind::Bar,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Png,
    Svg,
}

impl From<FormatArg> for ImageFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Png => ImageFormat::Png,
            FormatArg::Svg => ImageFormat::Svg,
        }
    }
}
