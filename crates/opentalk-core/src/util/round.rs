//! Rounding helpers for meeting start suggestions.
//!
//! ## Summary
//! New meetings are pre-filled with the next half-hour boundary in UTC so the
//! scheduling form never proposes a start time in the past.

use chrono::{DateTime, TimeDelta, Timelike, Utc};

use crate::constants::HALF_HOUR_MINUTES;

/// Rounds `date` up to the next `:00` or `:30` boundary in UTC.
///
/// Minutes below 30 snap to `:30` of the same hour, anything else (including
/// exactly `:30`) moves to `:00` of the next hour. Seconds and sub-seconds are
/// always zeroed. Day, month and year roll over through regular calendar
/// arithmetic. The last half hour of chrono's representable range has no
/// boundary above it and is returned unchanged.
///
/// Examples:
/// - `13:32:48` -> `14:00:00`
/// - `17:30:00` -> `18:00:00`
/// - `2022-12-20T23:45` -> `2022-12-21T00:00`
#[must_use]
pub fn round_to_upper_30(date: DateTime<Utc>) -> DateTime<Utc> {
    let Some(hour_start) = date
        .with_nanosecond(0)
        .and_then(|d| d.with_second(0))
        .and_then(|d| d.with_minute(0))
    else {
        return date;
    };

    let step = if date.minute() < HALF_HOUR_MINUTES {
        TimeDelta::minutes(i64::from(HALF_HOUR_MINUTES))
    } else {
        TimeDelta::hours(1)
    };

    hour_start.checked_add_signed(step).unwrap_or(date)
}

/// Default start for a meeting created right now.
#[must_use]
pub fn suggested_start() -> DateTime<Utc> {
    round_to_upper_30(Utc::now())
}
