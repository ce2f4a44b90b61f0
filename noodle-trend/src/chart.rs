//! Chart rendering with plotters.
//!
//! Days sit on an index axis (one slot per day that has reviews) so that
//! line and grouped bar charts share one coordinate system.

use noodle_common::{ChartKind, ImageFormat, Sentiment};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};
use std::error::Error as StdError;
use std::path::Path;
use std::sync::LazyLock;

use crate::aggregate::DailySentimentCounts;
use crate::error::{Result, TrendError};
use crate::range::DateInterval;

const CAPTION_FONT: (&str, f64) = ("sans-serif", 24.0);
const BAR_GROUP_WIDTH: f64 = 0.8;
const MARKER_RADIUS: u32 = 3;
const MAX_X_LABELS: usize = 12;

type DrawResult = std::result::Result<(), Box<dyn StdError>>;

/// DejaVu Sans, so bitmap output never depends on fonts installed on the host.
static BUNDLED_FONT: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

// Every text element (caption, ticks, axis names, legend) uses the
// "sans-serif" family, so one registration covers the whole chart.
static FONT_REGISTERED: LazyLock<std::result::Result<(), String>> = LazyLock::new(|| {
    register_font(CAPTION_FONT.0, FontStyle::Normal, BUNDLED_FONT)
        .map_err(|_| "bundled chart font is not a valid font".to_string())
});

/// Chart title for an interval.
pub fn chart_title(interval: &DateInterval) -> String {
    format!(
        "SteamNoodles Sentiment by Day ({} to {})",
        interval.start, interval.end
    )
}

fn color_for(sentiment: Sentiment) -> RGBColor {
    match sentiment {
        Sentiment::Negative => RED,
        Sentiment::Neutral => BLUE,
        Sentiment::Positive => GREEN,
    }
}

/// Render `counts` to `path` in the requested style and format.
pub fn render(
    counts: &DailySentimentCounts,
    interval: &DateInterval,
    kind: ChartKind,
    format: ImageFormat,
    size: (u32, u32),
    path: &Path,
) -> Result<()> {
    FONT_REGISTERED.clone().map_err(TrendError::Render)?;

    let title = chart_title(interval);
    let drawn = match format {
        ImageFormat::Png => draw(
            BitMapBackend::new(path, size).into_drawing_area(),
            counts,
            kind,
            &title,
        ),
        ImageFormat::Svg => draw(
            SVGBackend::new(path, size).into_drawing_area(),
            counts,
            kind,
            &title,
        ),
    };
    drawn.map_err(|e| TrendError::Render(e.to_string()))?;

    tracing::debug!(path = %path.display(), %kind, days = counts.days().len(), "Chart rendered");
    Ok(())
}

fn draw<DB>(
    root: DrawingArea<DB, Shift>,
    counts: &DailySentimentCounts,
    kind: ChartKind,
    title: &str,
) -> DrawResult
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let days = counts.days();
    let x_max = days.len().max(1) as f64 - 0.5;
    let y_max = (counts.max_count() as f64 * 1.1).ceil().max(1.0);

    let x_label = |x: &f64| {
        let rounded = x.round();
        if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
            return String::new();
        }
        days.get(rounded as usize)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    };

    let mut chart = ChartBuilder::on(&root)
        .caption(title, CAPTION_FONT)
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(50)
        .build_cartesian_2d(-0.5f64..x_max, 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(days.len().clamp(1, MAX_X_LABELS))
        .x_label_formatter(&x_label)
        .y_label_formatter(&|y: &f64| format!("{y:.0}"))
        .x_desc("Date")
        .y_desc("Count")
        .draw()?;

    let labels = counts.labels();
    for (slot, &sentiment) in labels.iter().enumerate() {
        let color = color_for(sentiment);
        let series = counts.series(sentiment);

        match kind {
            ChartKind::Line => {
                let points: Vec<(f64, f64)> = series
                    .iter()
                    .enumerate()
                    .map(|(i, &n)| (i as f64, n as f64))
                    .collect();

                chart
                    .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))?
                    .label(sentiment.as_str())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
                chart.draw_series(
                    points
                        .into_iter()
                        .map(|p| Circle::new(p, MARKER_RADIUS, color.filled())),
                )?;
            }
            ChartKind::Bar => {
                let width = BAR_GROUP_WIDTH / labels.len() as f64;
                let offset = -BAR_GROUP_WIDTH / 2.0 + slot as f64 * width;

                chart
                    .draw_series(series.iter().enumerate().map(|(i, &n)| {
                        let left = i as f64 + offset;
                        Rectangle::new([(left, 0.0), (left + width, n as f64)], color.filled())
                    }))?
                    .label(sentiment.as_str())
                    .legend(move |(x, y)| {
                        Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled())
                    });
            }
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
