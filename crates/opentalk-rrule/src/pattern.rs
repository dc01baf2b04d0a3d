//! Structured recurrence patterns for the meeting form.
//!
//! ## Summary
//! The scheduling form offers a handful of presets plus a custom dialog
//! (frequency, interval, weekdays and an end condition). [`RecurrencePattern`]
//! is that dialog's model; it renders to the RRULE string stored with the
//! meeting and can be read back from one.

use chrono::{DateTime, Utc, Weekday};
use opentalk_core::model::DateTimeTz;
use rrule::{NWeekday, RRule, Unvalidated};
use serde::{Deserialize, Serialize};

use crate::error::{RecurrenceError, RecurrenceResult};

/// Repetition frequencies offered by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
            Self::Yearly => "YEARLY",
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<rrule::Frequency> for Frequency {
    type Error = RecurrenceError;

    fn try_from(value: rrule::Frequency) -> RecurrenceResult<Self> {
        match value {
            rrule::Frequency::Daily => Ok(Self::Daily),
            rrule::Frequency::Weekly => Ok(Self::Weekly),
            rrule::Frequency::Monthly => Ok(Self::Monthly),
            rrule::Frequency::Yearly => Ok(Self::Yearly),
            other => Err(RecurrenceError::Unsupported(format!(
                "frequency {other:?} is not offered for meetings"
            ))),
        }
    }
}

/// How a series ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "value")]
pub enum RecurrenceEnd {
    #[default]
    Never,
    Until(DateTime<Utc>),
    Count(u32),
}

/// Model of the custom recurrence dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrencePattern {
    pub frequency: Frequency,
    pub interval: u16,
    /// Only meaningful for weekly patterns; empty means "the start's weekday".
    pub weekdays: Vec<Weekday>,
    pub end: RecurrenceEnd,
}

impl RecurrencePattern {
    #[must_use]
    pub const fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            interval: 1,
            weekdays: Vec::new(),
            end: RecurrenceEnd::Never,
        }
    }

    #[must_use]
    pub const fn daily() -> Self {
        Self::new(Frequency::Daily)
    }

    #[must_use]
    pub fn weekly_on(weekday: Weekday) -> Self {
        Self::new(Frequency::Weekly).with_weekdays(vec![weekday])
    }

    #[must_use]
    pub fn biweekly_on(weekday: Weekday) -> Self {
        Self::weekly_on(weekday).with_interval(2)
    }

    #[must_use]
    pub const fn monthly() -> Self {
        Self::new(Frequency::Monthly)
    }

    #[must_use]
    pub const fn yearly() -> Self {
        Self::new(Frequency::Yearly)
    }

    #[must_use]
    pub const fn with_interval(mut self, interval: u16) -> Self {
        self.interval = interval;
        self
    }

    #[must_use]
    pub fn with_weekdays(mut self, weekdays: Vec<Weekday>) -> Self {
        self.weekdays = weekdays;
        self
    }

    #[must_use]
    pub const fn with_end(mut self, end: RecurrenceEnd) -> Self {
        self.end = end;
        self
    }

    /// ## Summary
    /// Reads a stored RRULE back into the dialog model.
    ///
    /// ## Errors
    ///
    /// Returns an error if the rule cannot be parsed, uses a frequency finer
    /// than daily, or uses ordinal weekdays (`1MO`, `-1FR`) which the dialog
    /// cannot express.
    pub fn parse(rule: &str) -> RecurrenceResult<Self> {
        let parsed = rule.trim().parse::<RRule<Unvalidated>>()?;

        let frequency = Frequency::try_from(parsed.get_freq())?;
        let weekdays = parsed
            .get_by_weekday()
            .iter()
            .map(|weekday| match weekday {
                NWeekday::Every(day) => Ok(*day),
                NWeekday::Nth(n, day) => Err(RecurrenceError::Unsupported(format!(
                    "ordinal weekday {n}{}",
                    weekday_code(*day)
                ))),
            })
            .collect::<RecurrenceResult<Vec<_>>>()?;

        let end = match (parsed.get_until(), parsed.get_count()) {
            (Some(until), _) => RecurrenceEnd::Until(until.to_utc()),
            (None, Some(count)) => RecurrenceEnd::Count(count),
            (None, None) => RecurrenceEnd::Never,
        };

        let pattern = Self {
            frequency,
            interval: parsed.get_interval(),
            weekdays,
            end,
        };
        tracing::trace!(%rule, ?pattern, "Parsed recurrence pattern");
        Ok(pattern)
    }

    /// ## Summary
    /// Checks the pattern against the meeting start before it is saved.
    ///
    /// ## Errors
    ///
    /// Returns an error if the interval or count is zero, or if the `rrule`
    /// crate rejects the rule for this start (e.g. UNTIL before DTSTART).
    pub fn validate(&self, starts_at: &DateTimeTz) -> RecurrenceResult<()> {
        if self.interval == 0 {
            return Err(RecurrenceError::ValidationError(
                "interval must be at least 1".to_string(),
            ));
        }
        if self.end == RecurrenceEnd::Count(0) {
            return Err(RecurrenceError::ValidationError(
                "count must be at least 1".to_string(),
            ));
        }
        if let RecurrenceEnd::Until(until) = self.end {
            if until < starts_at.datetime {
                return Err(RecurrenceError::ValidationError(format!(
                    "series ends at {until} before it starts at {}",
                    starts_at.datetime
                )));
            }
        }

        let dt_start = starts_at
            .datetime
            .with_timezone(&rrule::Tz::Tz(starts_at.timezone));
        self.to_string()
            .parse::<RRule<Unvalidated>>()?
            .validate(dt_start)?;
        Ok(())
    }
}

impl std::fmt::Display for RecurrencePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FREQ={}", self.frequency)?;
        if self.interval != 1 {
            write!(f, ";INTERVAL={}", self.interval)?;
        }
        if !self.weekdays.is_empty() {
            let days = self
                .weekdays
                .iter()
                .map(|day| weekday_code(*day))
                .collect::<Vec<_>>()
                .join(",");
            write!(f, ";BYDAY={days}")?;
        }
        match self.end {
            RecurrenceEnd::Never => Ok(()),
            RecurrenceEnd::Until(until) => {
                write!(f, ";UNTIL={}", until.format("%Y%m%dT%H%M%SZ"))
            }
            RecurrenceEnd::Count(count) => write!(f, ";COUNT={count}"),
        }
    }
}

impl std::str::FromStr for RecurrencePattern {
    type Err = RecurrenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

const fn weekday_code(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
        Weekday::Sun => "SU",
    }
}
