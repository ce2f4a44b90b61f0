//! Trend plotting entry point.

use chrono::NaiveDate;
use noodle_common::{ChartKind, ImageFormat, TrendConfig};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use crate::aggregate::count_by_day;
use crate::chart;
use crate::dataset::{load_reviews, DatasetRow};
use crate::error::{Result, TrendError};
use crate::range::{DateInterval, DateRangeResolver};

/// What to plot. Every field is optional.
#[derive(Debug, Clone, Default)]
pub struct PlotRequest {
    /// Natural-language range ("last 7 days", "June 1 to June 15").
    pub range: Option<String>,
    /// Explicit start date, used when `range` is absent or not understood.
    pub start: Option<String>,
    /// Explicit end date.
    pub end: Option<String>,
    /// Chart style; the configured default when `None`.
    pub chart: Option<ChartKind>,
}

impl PlotRequest {
    pub fn with_range(range: impl Into<String>) -> Self {
        Self {
            range: Some(range.into()),
            ..Default::default()
        }
    }

    pub fn with_bounds(start: Option<String>, end: Option<String>) -> Self {
        Self {
            start,
            end,
            ..Default::default()
        }
    }

    pub fn chart(mut self, kind: ChartKind) -> Self {
        self.chart = Some(kind);
        self
    }
}

/// Loads the reviews dataset and renders per-day sentiment charts.
pub struct SentimentPlotter {
    config: TrendConfig,
    today: Option<NaiveDate>,
}

impl SentimentPlotter {
    pub fn new(config: TrendConfig) -> Self {
        Self {
            config,
            today: None,
        }
    }

    /// Pin "today" for relative ranges instead of reading the local clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn config(&self) -> &TrendConfig {
        &self.config
    }

    fn resolver(&self) -> DateRangeResolver {
        self.today
            .map_or_else(DateRangeResolver::from_local_clock, DateRangeResolver::new)
    }

    /// Plot review sentiment per day and return the path of the written chart.
    ///
    /// Fails with [`TrendError::NoDataInRange`] when no review falls inside
    /// the resolved interval; nothing is written in that case.
    pub fn plot_sentiment_trend(&self, request: &PlotRequest) -> Result<PathBuf> {
        let started = Instant::now();

        let report = load_reviews(&self.config.data_path)?;
        let interval = self.resolver().resolve(
            request.range.as_deref(),
            request.start.as_deref(),
            request.end.as_deref(),
        )?;

        let rows: Vec<DatasetRow> = report
            .rows
            .into_iter()
            .filter(|row| interval.contains(row.timestamp.date()))
            .collect();
        if rows.is_empty() {
            return Err(TrendError::NoDataInRange {
                start: interval.start,
                end: interval.end,
            });
        }

        let counts = count_by_day(&rows);
        let kind = request.chart.unwrap_or(self.config.chart);

        fs::create_dir_all(&self.config.output_dir)?;
        let path = self
            .config
            .output_dir
            .join(output_file_name(&interval, self.config.format));

        chart::render(
            &counts,
            &interval,
            kind,
            self.config.format,
            (self.config.width, self.config.height),
            &path,
        )?;

        tracing::info!(
            path = %path.display(),
            %interval,
            %kind,
            rows = rows.len(),
            days = counts.days().len(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Sentiment trend plotted"
        );
        Ok(path)
    }
}

/// File name for a chart covering `interval`.
pub fn output_file_name(interval: &DateInterval, format: ImageFormat) -> String {
    format!(
        "sentiment_trend_{}_to_{}.{}",
        interval.start,
        interval.end,
        format.extension()
    )
    .replace(':', "-")
}
