//! Natural-language and machine date parsing.
//!
//! Covers the forms people type on a command line ("June 1", "1st of June
//! 2024", "yesterday", "3 days ago", "2024-06-01") and the timestamp forms
//! found in exported review datasets.
//!
//! A date without a year is placed in the year of `today`. "June 1" typed in
//! January therefore means the upcoming June, not the previous one.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use std::sync::LazyLock;

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

static AGO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<n>\d+)\s+(?P<unit>day|week)s?\s+ago$").unwrap());

static MONTH_DAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<month>[a-z]+)\.?\s+(?P<day>\d{1,2})(?:st|nd|rd|th)?(?:,?\s+(?P<year>\d{4}))?$")
        .unwrap()
});

static DAY_MONTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<day>\d{1,2})(?:st|nd|rd|th)?\s+(?:of\s+)?(?P<month>[a-z]+)\.?(?:,?\s+(?P<year>\d{4}))?$",
    )
    .unwrap()
});

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Parse a machine-formatted timestamp.
///
/// Accepts RFC 3339, ISO-like datetimes with a space or `T` separator, and
/// ISO/US dates (which mean midnight). Offsets are dropped, keeping the
/// wall-clock time as written.
pub fn parse_timestamp(input: &str) -> Option<NaiveDateTime> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%z") {
        return Some(dt.naive_local());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.and_time(NaiveTime::MIN));
        }
    }
    None
}

/// Parse a date written the way a person would type it.
///
/// Returns `None` for anything it does not recognize; callers decide what
/// an unparseable expression means.
pub fn parse_natural_date(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    if let Some(dt) = parse_timestamp(input) {
        return Some(dt.date());
    }

    let lowered = input.trim().to_lowercase();
    let s = WHITESPACE.replace_all(&lowered, " ");
    let s = s.as_ref();

    match s {
        "today" | "now" => return Some(today),
        "yesterday" => return today.checked_sub_signed(Duration::days(1)),
        "tomorrow" => return today.checked_add_signed(Duration::days(1)),
        _ => {}
    }

    if let Some(caps) = AGO.captures(s) {
        let n: i64 = caps["n"].parse().ok()?;
        let days = if &caps["unit"] == "week" {
            n.checked_mul(7)?
        } else {
            n
        };
        return today.checked_sub_signed(Duration::try_days(days)?);
    }

    let caps = MONTH_DAY.captures(s).or_else(|| DAY_MONTH.captures(s))?;
    let month = month_number(&caps["month"])?;
    let day: u32 = caps["day"].parse().ok()?;
    let year = match caps.name("year") {
        Some(y) => y.as_str().parse().ok()?,
        None => today.year(),
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Month number for a full name or an unambiguous prefix of at least three letters.
fn month_number(token: &str) -> Option<u32> {
    if token.len() < 3 {
        return None;
    }
    MONTHS
        .iter()
        .position(|name| name.starts_with(token))
        .map(|idx| idx as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        ymd(2024, 6, 15)
    }

    #[test]
    fn parses_iso_and_us_dates() {
        assert_eq!(parse_natural_date("2024-06-01", today()), Some(ymd(2024, 6, 1)));
        assert_eq!(parse_natural_date("2024/06/01", today()), Some(ymd(2024, 6, 1)));
        assert_eq!(parse_natural_date("06/01/2024", today()), Some(ymd(2024, 6, 1)));
    }

    #[test]
    fn parses_month_name_forms() {
        assert_eq!(parse_natural_date("June 1", today()), Some(ymd(2024, 6, 1)));
        assert_eq!(parse_natural_date("jun 1st", today()), Some(ymd(2024, 6, 1)));
        assert_eq!(parse_natural_date("June 1, 2023", today()), Some(ymd(2023, 6, 1)));
        assert_eq!(parse_natural_date("1 June 2022", today()), Some(ymd(2022, 6, 1)));
        assert_eq!(parse_natural_date("15th of   March", today()), Some(ymd(2024, 3, 15)));
        assert_eq!(parse_natural_date("Sept. 3", today()), Some(ymd(2024, 9, 3)));
    }

    #[test]
    fn year_defaults_to_today() {
        let jan = ymd(2025, 1, 10);
        assert_eq!(parse_natural_date("December 24", jan), Some(ymd(2025, 12, 24)));
    }

    #[test]
    fn parses_relative_words() {
        assert_eq!(parse_natural_date("today", today()), Some(today()));
        assert_eq!(parse_natural_date("Yesterday", today()), Some(ymd(2024, 6, 14)));
        assert_eq!(parse_natural_date("tomorrow", today()), Some(ymd(2024, 6, 16)));
        assert_eq!(parse_natural_date("3 days ago", today()), Some(ymd(2024, 6, 12)));
        assert_eq!(parse_natural_date("1 day ago", today()), Some(ymd(2024, 6, 14)));
        assert_eq!(parse_natural_date("2 weeks ago", today()), Some(ymd(2024, 6, 1)));
    }

    #[test]
    fn rejects_unknown_and_impossible_dates() {
        assert_eq!(parse_natural_date("", today()), None);
        assert_eq!(parse_natural_date("someday", today()), None);
        assert_eq!(parse_natural_date("June 31", today()), None);
        assert_eq!(parse_natural_date("ju 1", today()), None);
        assert_eq!(parse_natural_date("last 7 days", today()), None);
        assert_eq!(parse_natural_date("june 1 to june 15", today()), None);
    }

    #[test]
    fn parses_timestamps() {
        let expected = ymd(2024, 6, 1).and_hms_opt(12, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2024-06-01 12:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-06-01T12:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-06-01 12:30"), Some(expected));
        assert_eq!(parse_timestamp("2024-06-01T12:30:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-06-01T12:30:00Z"), Some(expected));
        assert_eq!(
            parse_timestamp("2024-06-01"),
            Some(ymd(2024, 6, 1).and_hms_opt(0, 0, 0).unwrap())
        );
        assert_eq!(parse_timestamp("not a time"), None);
        assert_eq!(parse_timestamp("2024-13-01"), None);
    }

    #[test]
    fn datetime_input_truncates_to_date() {
        assert_eq!(
            parse_natural_date("2024-06-01T23:59:59", today()),
            Some(ymd(2024, 6, 1))
        );
    }
}
