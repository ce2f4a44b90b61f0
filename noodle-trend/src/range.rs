//! Date-range resolution.
//!
//! A natural-language `range` expression wins over explicit `start`/`end`
//! bounds. An expression that cannot be understood is ignored and the
//! explicit bounds are used instead.

use chrono::{Duration, Local, NaiveDate};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use crate::error::{Result, TrendError};
use crate::natural::{parse_natural_date, parse_timestamp};

static LAST_N_DAYS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^last\s+(?P<n>\d+)\s+days?\b").unwrap());

static TO_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\s+to\s+").unwrap());

/// Inclusive calendar interval.
///
/// Inverted bounds are allowed and contain nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateInterval {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateInterval {
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Interval with neither side bounded.
    pub const fn unbounded() -> Self {
        Self::new(NaiveDate::MIN, NaiveDate::MAX)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Resolves user-supplied range expressions relative to a fixed "today".
#[derive(Debug, Clone, Copy)]
pub struct DateRangeResolver {
    today: NaiveDate,
}

impl DateRangeResolver {
    pub const fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Resolver anchored to the local calendar date.
    pub fn from_local_clock() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub const fn today(&self) -> NaiveDate {
        self.today
    }

    /// Resolve a range expression, falling back to explicit bounds.
    pub fn resolve(
        &self,
        range: Option<&str>,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<DateInterval> {
        if let Some(expr) = range.map(str::trim).filter(|r| !r.is_empty()) {
            match self.resolve_natural(expr) {
                Some(interval) => {
                    tracing::debug!(range = expr, %interval, "Resolved natural-language range");
                    return Ok(interval);
                }
                None => {
                    tracing::debug!(range = expr, "Range not understood, using explicit bounds");
                }
            }
        }

        let start = parse_bound("start", start)?.unwrap_or(NaiveDate::MIN);
        let end = parse_bound("end", end)?.unwrap_or(NaiveDate::MAX);
        Ok(DateInterval::new(start, end))
    }

    fn resolve_natural(&self, expr: &str) -> Option<DateInterval> {
        if let Some(caps) = LAST_N_DAYS.captures(expr) {
            let n: i64 = caps["n"].parse().ok()?;
            let back = Duration::try_days(n - 1)?;
            let start = self.today.checked_sub_signed(back)?;
            return Some(DateInterval::new(start, self.today));
        }

        let sides: Vec<&str> = TO_SEPARATOR.split(expr).collect();
        if sides.len() == 2 {
            let start = parse_natural_date(sides[0], self.today);
            let end = parse_natural_date(sides[1], self.today);
            return match (start, end) {
                (Some(start), Some(end)) => Some(DateInterval::new(start, end)),
                _ => None,
            };
        }

        parse_natural_date(expr, self.today).map(|d| DateInterval::new(d, d))
    }
}

fn parse_bound(field: &'static str, value: Option<&str>) -> Result<Option<NaiveDate>> {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    parse_timestamp(raw)
        .map(|dt| Some(dt.date()))
        .ok_or_else(|| TrendError::InvalidDate {
            field,
            value: raw.to_string(),
        })
}
