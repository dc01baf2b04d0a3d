//! Wall-clock resolution in IANA zones.

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeDelta, TimeZone};
use chrono_tz::Tz;

/// Error while placing a wall-clock time into a zone.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// Non-existent time during DST gap.
    #[error("Non-existent time (DST gap): {0}")]
    NonExistentTime(String),
}

/// ## Summary
/// Resolves a wall-clock time in `tz` to an instant.
///
/// Ambiguous times (DST fold) resolve to the earlier instant.
///
/// ## Errors
///
/// Returns `ConversionError::NonExistentTime` if the time falls into a DST gap.
pub fn localize(tz: Tz, local_time: NaiveDateTime) -> Result<DateTime<Tz>, ConversionError> {
    match tz.from_local_datetime(&local_time) {
        LocalResult::None => Err(ConversionError::NonExistentTime(format!(
            "{local_time} in timezone {tz}"
        ))),
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(earliest, _latest) => Ok(earliest),
    }
}

/// ## Summary
/// Like [`localize`], but shifts times inside a DST gap forward by one hour.
///
/// ## Errors
///
/// Returns an error only if the shifted time is still not representable.
pub fn localize_lenient(
    tz: Tz,
    local_time: NaiveDateTime,
) -> Result<DateTime<Tz>, ConversionError> {
    match localize(tz, local_time) {
        Err(ConversionError::NonExistentTime(_)) => {
            tracing::trace!(%local_time, %tz, "Shifting time out of DST gap");
            localize(tz, local_time + TimeDelta::hours(1))
        }
        other => other,
    }
}
