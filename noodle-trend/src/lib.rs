//! Noodle Trend - per-day sentiment counts over a date range, rendered as a chart.
//!
//! Pipeline: [`dataset::load_reviews`] → [`range::DateRangeResolver`] →
//! [`aggregate::count_by_day`] → [`chart::render`], driven by
//! [`plotter::SentimentPlotter`].

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod aggregate;
pub mod chart;
pub mod dataset;
pub mod error;
pub mod natural;
pub mod plotter;
pub mod range;

pub use aggregate::{count_by_day, DailySentimentCounts};
pub use dataset::{load_reviews, DatasetRow, LoadReport};
pub use error::{Result, TrendError};
pub use natural::{parse_natural_date, parse_timestamp};
pub use plotter::{PlotRequest, SentimentPlotter};
pub use range::{DateInterval, DateRangeResolver};
