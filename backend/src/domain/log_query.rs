//! Validated log queries and the filter they describe.
//!
//! A [`LogQuery`] is built from raw request parameters in a fixed order:
//! `userId`, then `from`, then `to`, then `limit`. The first failing check is
//! reported and later parameters are not examined. Blank parameters are
//! treated as absent.
//!
//! Once built, the query is a pure description of which entries to return:
//! entries whose date lies inside the inclusive [`DateRange`], in stored
//! order, truncated to the limit. Storage adapters either evaluate it in
//! memory through [`LogQuery::select`] or translate it into their own query
//! language.

use chrono::{Local, TimeZone};

use super::ports::LogQueryRequest;
use super::{CalendarDay, DateField, Error, Exercise, InvalidDate, User, UserId, Username};

/// Raised when `limit` is not a non-negative integer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("limit must be a non-negative integer: {value}")]
pub struct InvalidLimit {
    value: String,
}

impl InvalidLimit {
    /// The rejected raw input.
    pub fn value(&self) -> &str {
        self.value.as_str()
    }
}

/// Parse a `limit` parameter.
///
/// The text must survive a round trip through integer formatting, so
/// fractional values, exponents, signs, and padded digits are all rejected.
///
/// # Examples
/// ```
/// use exercise_log::domain::parse_limit;
///
/// assert_eq!(parse_limit("3"), Ok(3));
/// assert!(parse_limit("1.5").is_err());
/// assert!(parse_limit("-1").is_err());
/// ```
pub fn parse_limit(raw: &str) -> Result<usize, InvalidLimit> {
    let invalid = || InvalidLimit {
        value: raw.to_owned(),
    };
    let value = raw.parse::<u64>().map_err(|_| invalid())?;
    if value.to_string() != raw {
        return Err(invalid());
    }
    usize::try_from(value).map_err(|_| invalid())
}

/// Inclusive range of calendar days; a missing end is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    from: Option<CalendarDay>,
    to: Option<CalendarDay>,
}

impl DateRange {
    /// Build a range from optional bounds.
    pub fn new(from: Option<CalendarDay>, to: Option<CalendarDay>) -> Self {
        Self { from, to }
    }

    /// Lower bound, inclusive.
    pub fn from(&self) -> Option<CalendarDay> {
        self.from
    }

    /// Upper bound, inclusive.
    pub fn to(&self) -> Option<CalendarDay> {
        self.to
    }

    /// Whether `day` falls inside the range.
    pub fn contains(&self, day: CalendarDay) -> bool {
        self.from.is_none_or(|from| day >= from) && self.to.is_none_or(|to| day <= to)
    }
}

/// A validated query over one user's log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogQuery {
    user_id: UserId,
    range: DateRange,
    limit: Option<usize>,
}

impl LogQuery {
    /// Build a query without parsing, for callers holding validated values.
    pub fn new(user_id: UserId, range: DateRange, limit: Option<usize>) -> Self {
        Self {
            user_id,
            range,
            limit,
        }
    }

    /// Validate raw parameters, normalising bounds in the local time zone.
    pub fn parse(request: &LogQueryRequest) -> Result<Self, Error> {
        Self::parse_in(&Local, request)
    }

    /// Validate raw parameters, normalising bounds in `tz`.
    ///
    /// `from` and `to` are parsed independently, each from its own parameter.
    pub fn parse_in<Tz: TimeZone>(tz: &Tz, request: &LogQueryRequest) -> Result<Self, Error> {
        let user_id = present(request.user_id.as_deref())
            .ok_or_else(|| Error::missing_parameter("userId"))
            .and_then(|raw| {
                UserId::new(raw).map_err(|_| Error::missing_parameter("userId"))
            })?;
        let from = parse_bound(tz, request.from.as_deref(), DateField::From)?;
        let to = parse_bound(tz, request.to.as_deref(), DateField::To)?;
        let limit = present(request.limit.as_deref())
            .map(parse_limit)
            .transpose()
            .map_err(|err| Error::invalid_limit(err.to_string()))?;

        Ok(Self::new(user_id, DateRange::new(from, to), limit))
    }

    /// The user whose log is queried.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Date bounds applied to entries.
    pub fn range(&self) -> DateRange {
        self.range
    }

    /// Maximum number of entries to return.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Whether a single entry passes the date filter.
    pub fn matches(&self, exercise: &Exercise) -> bool {
        self.range.contains(exercise.date())
    }

    /// Select matching entries from a log in stored order, honouring the limit.
    pub fn select<'a, I>(&self, log: I) -> Vec<Exercise>
    where
        I: IntoIterator<Item = &'a Exercise>,
    {
        log.into_iter()
            .filter(|exercise| self.matches(exercise))
            .take(self.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }
}

fn present(raw: Option<&str>) -> Option<&str> {
    raw.filter(|value| !value.trim().is_empty())
}

fn parse_bound<Tz: TimeZone>(
    tz: &Tz,
    raw: Option<&str>,
    field: DateField,
) -> Result<Option<CalendarDay>, Error> {
    present(raw)
        .map(|value| CalendarDay::parse_in(tz, value, field))
        .transpose()
        .map_err(|err: InvalidDate| Error::invalid_date(err.to_string()))
}

/// Result of a successful log query: identity plus the selected entries.
#[derive(Debug, Clone, PartialEq)]
pub struct LogView {
    id: UserId,
    username: Username,
    log: Vec<Exercise>,
}

impl LogView {
    /// Assemble a view for `user` from already-selected entries.
    pub fn new(user: User, log: Vec<Exercise>) -> Self {
        let (id, username) = user.into_parts();
        Self { id, username, log }
    }

    /// User identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Username.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Selected entries in stored order.
    pub fn log(&self) -> &[Exercise] {
        &self.log
    }

    /// Consume the view, yielding the entries.
    pub fn into_log(self) -> Vec<Exercise> {
        self.log
    }
}
