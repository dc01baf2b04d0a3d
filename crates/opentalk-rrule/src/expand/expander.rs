//! Expansion of recurring meetings into concrete instances.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use opentalk_core::constants::DEFAULT_MAX_MONTHS;
use opentalk_core::model::{DateTimeTz, RecurringEvent};
use opentalk_core::types::TimePerspectiveFilter;
use opentalk_core::util::{TimeWindow, compute_window};
use rrule::{RRule, RRuleError, Unvalidated, ValidationError};

use super::timezone::localize_lenient;
use crate::error::{RecurrenceError, RecurrenceResult};

/// Options for recurrence expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionOptions {
    /// Calendar months covered by the expansion window.
    pub max_months: u32,

    /// Maximum number of occurrences to generate.
    pub max_instances: u16,
}

impl Default for ExpansionOptions {
    fn default() -> Self {
        Self {
            max_months: DEFAULT_MAX_MONTHS,
            max_instances: u16::MAX,
        }
    }
}

impl ExpansionOptions {
    /// Sets the window span in months.
    #[must_use]
    pub const fn with_max_months(mut self, max_months: u32) -> Self {
        self.max_months = max_months;
        self
    }

    /// Sets the maximum number of instances.
    #[must_use]
    pub const fn with_max_instances(mut self, max: u16) -> Self {
        self.max_instances = max;
        self
    }
}

/// ## Summary
/// Expands a recurring meeting relative to the current time.
///
/// See [`expand_at`].
///
/// ## Errors
///
/// Same as [`expand_at`].
pub fn expand(
    event: &RecurringEvent,
    filter: TimePerspectiveFilter,
    options: &ExpansionOptions,
) -> RecurrenceResult<Vec<RecurringEvent>> {
    expand_at(event, Utc::now(), filter, options)
}

/// ## Summary
/// Expands a recurring meeting into one instance per occurrence inside the
/// window selected by `filter` around `now`.
///
/// Each instance is a copy of `event` whose start and end keep their
/// wall-clock time and zone while taking the occurrence's date. The end takes
/// the same date as the start, so meetings spanning midnight are not carried
/// over into the next day.
///
/// Instances are returned in chronological order. The time-independent
/// perspective yields no instances.
///
/// ## Errors
///
/// Returns an error if:
/// - The event has no recurrence pattern
/// - The RRULE is malformed or fails validation against the event start
/// - The window holds more occurrences than `options.max_instances`
/// - A transplanted wall-clock time cannot be placed in the event's zone
///
/// ## Side Effects
///
/// None - expansion is computed in memory.
pub fn expand_at(
    event: &RecurringEvent,
    now: DateTime<Utc>,
    filter: TimePerspectiveFilter,
    options: &ExpansionOptions,
) -> RecurrenceResult<Vec<RecurringEvent>> {
    let id = event.event.info.id;
    let rule = event.rule().ok_or(RecurrenceError::EmptyPattern(id))?;
    if filter == TimePerspectiveFilter::TimeIndependent {
        tracing::trace!(event_id = %id, "No expansion for the time-independent perspective");
        return Ok(Vec::new());
    }
    let window = compute_window(now, filter, options.max_months);

    let occurrences =
        occurrences_in_window(rule, &event.event.starts_at, window, options.max_instances)?;

    tracing::debug!(
        event_id = %id,
        %rule,
        %filter,
        count = occurrences.len(),
        "Expanded recurring event"
    );

    occurrences
        .into_iter()
        .map(|date| instance_on(event, date))
        .collect()
}

/// ## Summary
/// Lists the dates, in the zone of `starts_at`, on which `rule` produces an
/// occurrence inside `window` (bounds included).
///
/// The rule is anchored at `starts_at` in its own zone so the wall-clock time
/// stays fixed across DST changes. The window bounds iteration; the rule's own
/// UNTIL or COUNT may end it earlier.
///
/// A rule whose UNTIL lies before the start has no occurrences and yields an
/// empty list.
///
/// ## Errors
///
/// Returns `RecurrenceError::Rule` if the rule cannot be parsed or validated,
/// and `RecurrenceError::InstanceLimit` if the window holds more than
/// `max_instances` occurrences.
pub fn occurrences_in_window(
    rule: &str,
    starts_at: &DateTimeTz,
    window: TimeWindow,
    max_instances: u16,
) -> RecurrenceResult<Vec<NaiveDate>> {
    let tz = rrule::Tz::Tz(starts_at.timezone);
    let dt_start = starts_at.datetime.with_timezone(&tz);

    let rrule_set = match rule.parse::<RRule<Unvalidated>>()?.build(dt_start) {
        Ok(set) => set,
        Err(RRuleError::ValidationError(ValidationError::UntilBeforeStart { until, .. })) => {
            tracing::debug!(%rule, %until, "Series ends before it starts");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    // Widened by a second on each side; inclusion is decided by `window.contains`.
    let after = window
        .start
        .checked_sub_signed(TimeDelta::seconds(1))
        .unwrap_or(window.start);
    let before = window
        .end
        .checked_add_signed(TimeDelta::seconds(1))
        .unwrap_or(window.end);

    // One past the cap, so a window holding exactly `max_instances` is not
    // mistaken for a truncated one. `rrule` also flags results it cut short on
    // its own iteration limit.
    let query_limit = max_instances.saturating_add(1);
    let result = rrule_set
        .after(after.with_timezone(&tz))
        .before(before.with_timezone(&tz))
        .all(query_limit);

    let over_cap = result.dates.len() > usize::from(max_instances);
    let cut_short = result.limited
        && (query_limit == max_instances || result.dates.len() < usize::from(query_limit));
    if over_cap || cut_short {
        tracing::warn!(
            %rule,
            max_instances,
            found = result.dates.len(),
            "Recurrence expansion hit the instance limit"
        );
        return Err(RecurrenceError::InstanceLimit {
            rule: rule.to_string(),
            max_instances,
        });
    }

    let dates = result
        .dates
        .into_iter()
        .filter(|occurrence| window.contains(occurrence.to_utc()))
        .map(|occurrence| occurrence.with_timezone(&starts_at.timezone).date_naive())
        .collect::<Vec<_>>();

    tracing::trace!(
        %rule,
        window_start = %window.start,
        window_end = %window.end,
        count = dates.len(),
        "Collected occurrence dates"
    );
    Ok(dates)
}

fn instance_on(source: &RecurringEvent, date: NaiveDate) -> RecurrenceResult<RecurringEvent> {
    let mut instance = source.clone();
    instance.event.starts_at = move_to_date(source.event.starts_at, date)?;
    instance.event.ends_at = move_to_date(source.event.ends_at, date)?;
    Ok(instance)
}

/// Replaces the calendar date of `original` in its own zone, keeping the
/// wall-clock time.
fn move_to_date(original: DateTimeTz, date: NaiveDate) -> RecurrenceResult<DateTimeTz> {
    let time = original.local().time();
    let moved = localize_lenient(original.timezone, date.and_time(time))?;
    Ok(DateTimeTz::new(moved.to_utc(), original.timezone))
}
