//! Exercise log entries.
//!
//! Entries are immutable once appended and carry no identity of their own;
//! they are addressed only through the owning user's log.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::CalendarDay;

/// Validation errors returned by the entry constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExerciseValidationError {
    #[error("description is required")]
    EmptyDescription,
    #[error("duration must be a finite number")]
    InvalidDuration,
}

/// Free-text description of an exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Description(String);

impl Description {
    /// Validate and construct a [`Description`].
    pub fn new(description: impl Into<String>) -> Result<Self, ExerciseValidationError> {
        Self::from_owned(description.into())
    }

    fn from_owned(description: String) -> Result<Self, ExerciseValidationError> {
        if description.trim().is_empty() {
            return Err(ExerciseValidationError::EmptyDescription);
        }
        Ok(Self(description))
    }
}

impl AsRef<str> for Description {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Description> for String {
    fn from(value: Description) -> Self {
        value.0
    }
}

impl TryFrom<String> for Description {
    type Error = ExerciseValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Exercise duration in minutes. No range is enforced beyond finiteness.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct DurationMinutes(f64);

impl DurationMinutes {
    /// Validate and construct a duration.
    pub fn new(minutes: f64) -> Result<Self, ExerciseValidationError> {
        if minutes.is_finite() {
            Ok(Self(minutes))
        } else {
            Err(ExerciseValidationError::InvalidDuration)
        }
    }

    /// Parse a textual duration as submitted through a form body.
    pub fn parse(raw: &str) -> Result<Self, ExerciseValidationError> {
        raw.trim()
            .parse::<f64>()
            .map_err(|_| ExerciseValidationError::InvalidDuration)
            .and_then(Self::new)
    }

    /// Minutes as a float.
    pub fn as_f64(self) -> f64 {
        self.0
    }
}

impl From<DurationMinutes> for f64 {
    fn from(value: DurationMinutes) -> Self {
        value.0
    }
}

impl TryFrom<f64> for DurationMinutes {
    type Error = ExerciseValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// One entry in a user's exercise log.
///
/// ## Invariants
/// - `description` is non-blank.
/// - `date` has no time-of-day component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Exercise {
    description: Description,
    duration: DurationMinutes,
    date: CalendarDay,
}

impl Exercise {
    /// Build an entry from validated components.
    pub fn new(description: Description, duration: DurationMinutes, date: CalendarDay) -> Self {
        Self {
            description,
            duration,
            date,
        }
    }

    /// Entry description.
    pub fn description(&self) -> &Description {
        &self.description
    }

    /// Entry duration.
    pub fn duration(&self) -> DurationMinutes {
        self.duration
    }

    /// Calendar day the exercise happened on.
    pub fn date(&self) -> CalendarDay {
        self.date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DateField;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("  \t")]
    fn description_rejects_blank(#[case] raw: &str) {
        assert_eq!(
            Description::new(raw),
            Err(ExerciseValidationError::EmptyDescription)
        );
    }

    #[rstest]
    #[case("30", 30.0)]
    #[case(" 12.5 ", 12.5)]
    #[case("-5", -5.0)]
    fn duration_parses_numbers(#[case] raw: &str, #[case] expected: f64) {
        let duration = DurationMinutes::parse(raw).expect("numeric");
        assert_eq!(duration.as_f64(), expected);
    }

    #[rstest]
    #[case("thirty")]
    #[case("")]
    #[case("NaN")]
    #[case("inf")]
    fn duration_rejects_non_finite(#[case] raw: &str) {
        assert_eq!(
            DurationMinutes::parse(raw),
            Err(ExerciseValidationError::InvalidDuration)
        );
    }

    #[rstest]
    fn exercise_serialises_with_rendered_date() {
        let exercise = Exercise::new(
            Description::new("run").expect("description"),
            DurationMinutes::new(10.0).expect("duration"),
            CalendarDay::parse("2024-01-10", DateField::Date).expect("date"),
        );
        let value = serde_json::to_value(&exercise).expect("serialises");
        assert_eq!(
            value,
            serde_json::json!({
                "description": "run",
                "duration": 10.0,
                "date": "Wed Jan 10 2024",
            })
        );
    }
}
