//! Per-day sentiment counting.

use chrono::NaiveDate;
use noodle_common::Sentiment;
use std::collections::{BTreeMap, BTreeSet};

use crate::dataset::DatasetRow;

/// Day × label count table.
///
/// Days are ascending and only days with at least one review appear.
/// Columns are the labels observed in the input, in [`Sentiment`] order.
/// A day/label pair with no reviews counts as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailySentimentCounts {
    days: Vec<NaiveDate>,
    labels: Vec<Sentiment>,
    // counts[day][label], indexed like `days` and `labels`
    counts: Vec<Vec<usize>>,
}

impl DailySentimentCounts {
    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    pub fn labels(&self) -> &[Sentiment] {
        &self.labels
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Count for one day and label, 0 when either is absent.
    pub fn count(&self, day: NaiveDate, label: Sentiment) -> usize {
        let Ok(d) = self.days.binary_search(&day) else {
            return 0;
        };
        self.labels
            .iter()
            .position(|l| *l == label)
            .map_or(0, |l| self.counts[d][l])
    }

    /// One count per day for `label`, aligned with [`Self::days`].
    pub fn series(&self, label: Sentiment) -> Vec<usize> {
        match self.labels.iter().position(|l| *l == label) {
            Some(l) => self.counts.iter().map(|row| row[l]).collect(),
            None => vec![0; self.days.len()],
        }
    }

    /// Largest single cell, used to scale the y axis.
    pub fn max_count(&self) -> usize {
        self.counts
            .iter()
            .flat_map(|row| row.iter().copied())
            .max()
            .unwrap_or(0)
    }

    /// Total reviews across the table.
    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }
}

/// Group rows by calendar day and sentiment.
pub fn count_by_day(rows: &[DatasetRow]) -> DailySentimentCounts {
    let labels: Vec<Sentiment> = rows
        .iter()
        .map(|r| r.sentiment)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut by_day: BTreeMap<NaiveDate, Vec<usize>> = BTreeMap::new();
    for row in rows {
        let cells = by_day
            .entry(row.timestamp.date())
            .or_insert_with(|| vec![0; labels.len()]);
        if let Some(l) = labels.iter().position(|l| *l == row.sentiment) {
            cells[l] += 1;
        }
    }

    let (days, counts): (Vec<_>, Vec<_>) = by_day.into_iter().unzip();
    DailySentimentCounts {
        days,
        labels,
        counts,
    }
}
