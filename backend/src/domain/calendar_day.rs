//! Calendar-day dates with the time of day discarded.
//!
//! Every stored exercise date and every range bound passes through
//! [`CalendarDay::parse`] (or one of its siblings) before it is stored or
//! compared, so range comparisons are exact on whole days.
//!
//! Textual inputs are tried in this order:
//! - RFC 3339 timestamps and `+hhmm` offset timestamps
//!   (`2024-01-05T10:00:00+0200`), converted into the local zone before
//!   truncation;
//! - naive date-times (`2024-01-05T17:30`, `2024-01-05 17:30:00`), read as local;
//! - plain dates: `2024-01-05`, `2024/01/05`, `01/05/2024`, `Jan 05 2024`,
//!   `January 5, 2024`.
//!
//! A leading weekday (`Fri Jan 05 2024`) is dropped before the plain date
//! shapes are tried, so it never has to agree with the date that follows.

use std::fmt;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Weekday};
use mockable::Clock;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Human-readable rendering shared by every response carrying a date.
pub const RENDER_FORMAT: &str = "%a %b %d %Y";

const OFFSET_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];

const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%b %d %Y",
    "%B %d, %Y",
    "%B %d %Y",
];

/// Which input a date was parsed from, so failures can name it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateField {
    /// Lower bound of a log query.
    From,
    /// Upper bound of a log query.
    To,
    /// Date of an appended exercise.
    Date,
}

impl DateField {
    /// Parameter name as it appears on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::From => "from",
            Self::To => "to",
            Self::Date => "date",
        }
    }
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when an input is not a recognisable date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field} is not a valid date: {value}")]
pub struct InvalidDate {
    field: DateField,
    value: String,
}

impl InvalidDate {
    fn new(field: DateField, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }

    /// The field that failed to parse.
    pub fn field(&self) -> DateField {
        self.field
    }

    /// The rejected raw input.
    pub fn value(&self) -> &str {
        self.value.as_str()
    }
}

/// A date normalised to midnight, ordered chronologically.
///
/// # Examples
/// ```
/// use exercise_log::domain::{CalendarDay, DateField};
///
/// let morning = CalendarDay::parse("2024-01-01T06:15:00", DateField::Date).unwrap();
/// let evening = CalendarDay::parse("2024-01-01 21:40", DateField::Date).unwrap();
/// assert_eq!(morning, evening);
/// assert_eq!(morning.to_string(), "Mon Jan 01 2024");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDay(NaiveDate);

impl CalendarDay {
    /// Normalise `raw` using the server's local time zone.
    pub fn parse(raw: &str, field: DateField) -> Result<Self, InvalidDate> {
        Self::parse_in(&Local, raw, field)
    }

    /// Normalise `raw`, converting zoned timestamps into `tz` before truncation.
    pub fn parse_in<Tz: TimeZone>(tz: &Tz, raw: &str, field: DateField) -> Result<Self, InvalidDate> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InvalidDate::new(field, raw));
        }

        let zoned = DateTime::parse_from_rfc3339(trimmed).ok().or_else(|| {
            OFFSET_DATE_TIME_FORMATS
                .iter()
                .find_map(|format| DateTime::parse_from_str(trimmed, format).ok())
        });
        if let Some(timestamp) = zoned {
            return Ok(Self(timestamp.with_timezone(tz).date_naive()));
        }

        let naive_date_time = NAIVE_DATE_TIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok());
        if let Some(value) = naive_date_time {
            return Ok(Self(value.date()));
        }

        let undated = without_weekday(trimmed);
        DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(undated, format).ok())
            .map(Self)
            .ok_or_else(|| InvalidDate::new(field, raw))
    }

    /// Normalise a Unix timestamp in milliseconds using the local time zone.
    pub fn from_timestamp_millis(millis: i64, field: DateField) -> Result<Self, InvalidDate> {
        Self::from_timestamp_millis_in(&Local, millis, field)
    }

    /// Normalise a Unix timestamp in milliseconds within `tz`.
    pub fn from_timestamp_millis_in<Tz: TimeZone>(
        tz: &Tz,
        millis: i64,
        field: DateField,
    ) -> Result<Self, InvalidDate> {
        DateTime::from_timestamp_millis(millis)
            .map(|timestamp| Self(timestamp.with_timezone(tz).date_naive()))
            .ok_or_else(|| InvalidDate::new(field, millis.to_string()))
    }

    /// The current local calendar day according to `clock`.
    pub fn today(clock: &dyn Clock) -> Self {
        Self(clock.local().date_naive())
    }

    /// Access the underlying date.
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }
}

/// Drop a leading weekday name such as `Tue` or `Friday,`.
fn without_weekday(raw: &str) -> &str {
    match raw.split_once(char::is_whitespace) {
        Some((head, rest)) if head.trim_end_matches(',').parse::<Weekday>().is_ok() => {
            rest.trim_start()
        }
        _ => raw,
    }
}

impl From<NaiveDate> for CalendarDay {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

impl fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(RENDER_FORMAT))
    }
}

impl Serialize for CalendarDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw, DateField::Date).map_err(serde::de::Error::custom)
    }
}
