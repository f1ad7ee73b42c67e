//! Calendar date handling for `<input type="date">` values.
//!
//! Dates are always naive (no timezone). A `YYYY-MM-DD` string is turned into
//! that exact calendar day, never a UTC instant that a local offset could
//! shift to the previous or next day.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

static DATE_ONLY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").expect("invalid date regex")
});

/// Formats tried, in order, when a value is not date-only shaped.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y/%m/%d", "%m/%d/%Y", "%B %d, %Y", "%b %d, %Y", "%d %B %Y"];

/// A date value, or the invalid-date sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateValue {
    Valid(NaiveDateTime),
    /// Produced for unparsable input; left for schema validation to reject.
    Invalid,
}

impl DateValue {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Self {
        NaiveDate::from_ymd_opt(year, month, day)
            .map_or(DateValue::Invalid, |date| DateValue::Valid(date.and_time(NaiveTime::MIN)))
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, DateValue::Valid(_))
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            DateValue::Valid(datetime) => Some(datetime.date()),
            DateValue::Invalid => None,
        }
    }

    /// `YYYY-MM-DD`, or `None` for the invalid sentinel.
    pub fn to_form_string(&self) -> Option<String> {
        self.date().map(|date| date.format("%Y-%m-%d").to_string())
    }
}

impl From<NaiveDate> for DateValue {
    fn from(date: NaiveDate) -> Self {
        DateValue::Valid(date.and_time(NaiveTime::MIN))
    }
}

impl From<NaiveDateTime> for DateValue {
    fn from(datetime: NaiveDateTime) -> Self {
        DateValue::Valid(datetime)
    }
}

/// Parse a `YYYY-MM-DD` string into a local calendar date.
///
/// Returns `None` when the input is not date-only shaped. Shaped input with
/// out-of-range components (`2001-02-30`) yields [`DateValue::Invalid`].
pub fn parse_date_only(input: &str) -> Option<DateValue> {
    let captures = DATE_ONLY_PATTERN.captures(input)?;
    let year = captures[1].parse::<i32>().ok()?;
    let month = captures[2].parse::<u32>().ok()?;
    let day = captures[3].parse::<u32>().ok()?;
    Some(DateValue::from_ymd(year, month, day))
}

/// Best-effort parse of any other textual date representation.
pub fn parse_date_generic(input: &str) -> DateValue {
    let input = input.trim();
    if let Some(date) = parse_date_only(input) {
        return date;
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(input) {
        return DateValue::Valid(datetime.naive_local());
    }
    if let Some(datetime) = DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
    {
        return DateValue::Valid(datetime);
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
        .map_or(DateValue::Invalid, DateValue::from)
}
