use chrono::{DateTime, Utc};
use opentalk_core::config::ScheduleConfig;
use opentalk_core::model::Event;
use opentalk_core::types::{InviteStatus, SortDirection, TimePerspectiveFilter};
use opentalk_rrule::expand::{ExpansionOptions, expand_at};

use super::order::order_by_date;
use crate::error::ServiceResult;

/// ## Summary
/// Replaces every recurring event with its instances around the current time.
///
/// See [`append_recurrence_instances_at`].
///
/// ## Errors
///
/// Same as [`append_recurrence_instances_at`].
pub fn append_recurrence_instances(
    events: Vec<Event>,
    filter_declined_invites: bool,
    options: &ExpansionOptions,
    perspective: TimePerspectiveFilter,
) -> ServiceResult<Vec<Event>> {
    append_recurrence_instances_at(
        events,
        Utc::now(),
        filter_declined_invites,
        options,
        perspective,
    )
}

/// ## Summary
/// Replaces every recurring event with its instances inside the window
/// selected by `perspective` around `now`.
///
/// - Timeless events pass through unchanged.
/// - Single timed events pass through, except declined ones when
///   `filter_declined_invites` is set.
/// - Recurring events are replaced by their expansion; the invite filter does
///   not apply to them.
///
/// The result keeps the input order with expansions spliced in place; callers
/// that need a chronological list apply [`order_by_date`].
///
/// ## Errors
///
/// Returns `ServiceError::RecurrenceError` if any recurring event fails to
/// expand. No partial list is returned.
pub fn append_recurrence_instances_at(
    events: Vec<Event>,
    now: DateTime<Utc>,
    filter_declined_invites: bool,
    options: &ExpansionOptions,
    perspective: TimePerspectiveFilter,
) -> ServiceResult<Vec<Event>> {
    let input_len = events.len();
    let mut result = Vec::with_capacity(input_len);

    for event in events {
        match event {
            Event::Timeless(_) => result.push(event),
            Event::Single(_) => {
                if filter_declined_invites && event.invite_status() == InviteStatus::Declined {
                    tracing::trace!(event_id = %event.id(), "Skipping declined event");
                    continue;
                }
                result.push(event);
            }
            Event::Recurring(recurring) => {
                let instances = expand_at(&recurring, now, perspective, options)?;
                result.extend(instances.into_iter().map(Event::Recurring));
            }
        }
    }

    tracing::debug!(
        input = input_len,
        output = result.len(),
        %perspective,
        filter_declined_invites,
        "Appended recurrence instances"
    );
    Ok(result)
}

/// ## Summary
/// Expands and orders a list of events using the configured schedule
/// defaults.
///
/// ## Errors
///
/// Returns an error if the configuration is invalid or expansion fails.
pub fn build_schedule(
    events: Vec<Event>,
    config: &ScheduleConfig,
    now: DateTime<Utc>,
    direction: SortDirection,
) -> ServiceResult<Vec<Event>> {
    config.validate()?;
    let options = ExpansionOptions::default().with_max_months(config.max_months);
    let expanded = append_recurrence_instances_at(
        events,
        now,
        config.filter_declined_invites,
        &options,
        config.default_perspective,
    )?;
    Ok(order_by_date(expanded, direction))
}

/// Keeps only events whose invite is in `status`.
#[must_use]
pub fn retain_invite_status(mut events: Vec<Event>, status: InviteStatus) -> Vec<Event> {
    events.retain(|event| event.invite_status() == status);
    events
}
