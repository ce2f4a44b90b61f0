//! Reviews dataset loading.
//!
//! The dataset is a CSV file with a header row. `timestamp` and `sentiment`
//! are required; `text` is optional. Column names are matched
//! case-insensitively and extra columns are ignored.

use chrono::NaiveDateTime;
use csv::{ReaderBuilder, StringRecord};
use noodle_common::Sentiment;
use serde::Serialize;
use std::fs::File;
use std::path::Path;

use crate::error::{Result, TrendError};
use crate::natural::parse_timestamp;

/// A single review that survived loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetRow {
    pub timestamp: NaiveDateTime,
    pub text: String,
    pub sentiment: Sentiment,
}

/// Loaded rows plus how many records were discarded.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub rows: Vec<DatasetRow>,
    pub dropped: usize,
}

#[derive(Debug, Clone, Copy)]
struct Columns {
    timestamp: usize,
    sentiment: usize,
    text: Option<usize>,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };

        Ok(Self {
            timestamp: find("timestamp").ok_or(TrendError::MissingColumn("timestamp"))?,
            sentiment: find("sentiment").ok_or(TrendError::MissingColumn("sentiment"))?,
            text: find("text"),
        })
    }

    fn row(&self, record: &StringRecord) -> Option<DatasetRow> {
        let raw_sentiment = record.get(self.sentiment)?.trim();
        if raw_sentiment.is_empty() {
            return None;
        }
        let timestamp = parse_timestamp(record.get(self.timestamp)?)?;
        let text = self
            .text
            .and_then(|idx| record.get(idx))
            .unwrap_or_default()
            .to_string();

        Some(DatasetRow {
            timestamp,
            text,
            sentiment: Sentiment::normalize(raw_sentiment),
        })
    }
}

/// Load the reviews dataset, dropping rows that cannot be used.
///
/// A missing file or a header without the required columns is an error.
/// Malformed records, unparseable timestamps and blank sentiments are
/// skipped and counted in [`LoadReport::dropped`].
pub fn load_reviews(path: &Path) -> Result<LoadReport> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(file);

    let columns = Columns::locate(reader.headers()?)?;
    let mut report = LoadReport::default();

    for record in reader.records() {
        match record {
            Ok(record) => match columns.row(&record) {
                Some(row) => report.rows.push(row),
                None => report.dropped += 1,
            },
            Err(e) => {
                tracing::debug!(error = %e, "Skipping malformed dataset record");
                report.dropped += 1;
            }
        }
    }

    tracing::info!(
        path = %path.display(),
        rows = report.rows.len(),
        dropped = report.dropped,
        "Loaded reviews dataset"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_and_normalizes_rows() {
        let file = write_csv(
            "timestamp,text,sentiment\n\
             2024-06-01 10:00:00,Great broth,Positive\n\
             2024-06-01T12:30:00,Cold noodles, negative \n\
             2024-06-02,It was fine,meh\n",
        );
        let report = load_reviews(file.path()).unwrap();

        assert_eq!(report.dropped, 0);
        assert_eq!(report.rows.len(), 3);
        assert_eq!(report.rows[0].sentiment, Sentiment::Positive);
        assert_eq!(report.rows[0].text, "Great broth");
        assert_eq!(report.rows[1].sentiment, Sentiment::Negative);
        assert_eq!(report.rows[2].sentiment, Sentiment::Neutral);
        assert_eq!(
            report.rows[2].timestamp,
            NaiveDate::from_ymd_opt(2024, 6, 2)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn drops_unusable_rows() {
        let file = write_csv(
            "timestamp,text,sentiment\n\
             not-a-date,Nice,positive\n\
             2024-06-01,No label,\n\
             2024-06-01\n\
             2024-06-03,Ok,neutral\n",
        );
        let report = load_reviews(file.path()).unwrap();

        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.dropped, 3);
        assert_eq!(report.rows[0].sentiment, Sentiment::Neutral);
    }

    #[test]
    fn text_column_is_optional_and_headers_are_case_insensitive() {
        let file = write_csv("Sentiment, Timestamp ,rating\npositive,2024-06-01,5\n");
        let report = load_reviews(file.path()).unwrap();

        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].text, "");
        assert_eq!(report.rows[0].sentiment, Sentiment::Positive);
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let file = write_csv("timestamp,text\n2024-06-01,hello\n");
        let err = load_reviews(file.path()).unwrap_err();
        assert!(matches!(err, TrendError::MissingColumn("sentiment")));

        let file = write_csv("date,sentiment\n2024-06-01,positive\n");
        let err = load_reviews(file.path()).unwrap_err();
        assert!(matches!(err, TrendError::MissingColumn("timestamp")));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_reviews(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, TrendError::Io(_)));
    }
}
