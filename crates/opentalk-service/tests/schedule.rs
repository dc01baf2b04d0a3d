//! Schedule assembly over API-shaped event lists.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use opentalk_core::config::ScheduleConfig;
use opentalk_core::model::{DateTimeTz, Event, EventInfo, TimedEvent};
use opentalk_core::types::{InviteStatus, SortDirection, TimePerspectiveFilter};
use opentalk_rrule::expand::ExpansionOptions;
use opentalk_service::schedule::{
    append_recurrence_instances_at, build_schedule, order_by_date, retain_invite_status,
};
use proptest::prelude::*;
use serde_json::json;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

fn events_from_api() -> Vec<Event> {
    serde_json::from_value(json!([
        {
            "id": "00000000-0000-0000-0000-000000000001",
            "title": "Friday sync",
            "created_at": "2024-01-10T08:00:00Z",
            "invite_status": "accepted",
            "is_time_independent": false,
            "starts_at": { "datetime": "2024-02-16T10:30:00Z", "timezone": "UTC" },
            "ends_at": { "datetime": "2024-02-16T11:30:00Z", "timezone": "UTC" },
            "recurrence_pattern": ["FREQ=WEEKLY"]
        },
        {
            "id": "00000000-0000-0000-0000-000000000002",
            "title": "Declined review",
            "created_at": "2024-01-11T08:00:00Z",
            "invite_status": "declined",
            "is_time_independent": false,
            "starts_at": { "datetime": "2024-03-05T09:00:00Z", "timezone": "UTC" },
            "ends_at": { "datetime": "2024-03-05T10:00:00Z", "timezone": "UTC" }
        },
        {
            "id": "00000000-0000-0000-0000-000000000003",
            "title": "Planning",
            "created_at": "2024-01-12T08:00:00Z",
            "invite_status": "pending",
            "is_time_independent": false,
            "starts_at": { "datetime": "2024-03-04T14:00:00Z", "timezone": "Europe/Berlin" },
            "ends_at": { "datetime": "2024-03-04T15:00:00Z", "timezone": "Europe/Berlin" }
        },
        {
            "id": "00000000-0000-0000-0000-000000000004",
            "title": "Open room",
            "created_at": "2024-01-13T08:00:00Z",
            "invite_status": "declined",
            "is_time_independent": true
        },
        {
            "id": "00000000-0000-0000-0000-000000000005",
            "title": "Declined standup series",
            "created_at": "2024-01-14T08:00:00Z",
            "invite_status": "declined",
            "is_time_independent": false,
            "starts_at": { "datetime": "2024-02-19T09:00:00Z", "timezone": "UTC" },
            "ends_at": { "datetime": "2024-02-19T09:15:00Z", "timezone": "UTC" },
            "recurrence_pattern": ["FREQ=WEEKLY;BYDAY=MO;COUNT=4"]
        }
    ]))
    .unwrap()
}

fn count_id(events: &[Event], id: u128) -> usize {
    events
        .iter()
        .filter(|event| event.id().as_u128() == id)
        .count()
}

#[test_log::test]
fn declined_single_events_are_dropped_when_filtering() {
    let expanded = append_recurrence_instances_at(
        events_from_api(),
        now(),
        true,
        &ExpansionOptions::default(),
        TimePerspectiveFilter::Future,
    )
    .unwrap();

    assert!(!expanded.iter().any(|event| matches!(event, Event::Single(_))
        && event.invite_status() == InviteStatus::Declined));
    assert_eq!(count_id(&expanded, 2), 0);
    assert_eq!(count_id(&expanded, 3), 1);
    // Timeless events stay, whatever their invite status
    assert_eq!(count_id(&expanded, 4), 1);
    // 13 Fridays between 2024-03-08 and 2024-05-31
    assert_eq!(count_id(&expanded, 1), 13);
    // Series of four Mondays starting 2024-02-19 has two left: 03-04 and 03-11
    assert_eq!(count_id(&expanded, 5), 2);
}

#[test_log::test]
fn declined_single_events_are_kept_without_filtering() {
    let expanded = append_recurrence_instances_at(
        events_from_api(),
        now(),
        false,
        &ExpansionOptions::default(),
        TimePerspectiveFilter::Future,
    )
    .unwrap();

    assert_eq!(count_id(&expanded, 2), 1);
    assert_eq!(count_id(&expanded, 4), 1);
}

#[test]
fn past_perspective_expands_backwards() {
    let expanded = append_recurrence_instances_at(
        events_from_api(),
        now(),
        true,
        &ExpansionOptions::default(),
        TimePerspectiveFilter::Past,
    )
    .unwrap();

    // Fridays 2024-02-16 through 2024-03-01, the latter at 10:30 before noon
    assert_eq!(count_id(&expanded, 1), 3);
    // Mondays 2024-02-19, 2024-02-26
    assert_eq!(count_id(&expanded, 5), 2);
    assert_eq!(count_id(&expanded, 4), 1);
}

#[test]
fn expansion_errors_propagate() {
    let mut events = events_from_api();
    if let Some(Event::Recurring(recurring)) = events.first_mut() {
        recurring.recurrence_pattern = vec!["FREQ=WHENEVER".to_string()];
    }

    let result = append_recurrence_instances_at(
        events,
        now(),
        true,
        &ExpansionOptions::default(),
        TimePerspectiveFilter::Future,
    );
    assert!(result.is_err());
}

#[test]
fn series_ending_before_its_start_does_not_fail_the_list() {
    let mut events = events_from_api();
    if let Some(Event::Recurring(recurring)) = events.first_mut() {
        recurring.recurrence_pattern = vec!["FREQ=WEEKLY;UNTIL=20240101T000000Z".to_string()];
    }

    let expanded = append_recurrence_instances_at(
        events,
        now(),
        true,
        &ExpansionOptions::default(),
        TimePerspectiveFilter::Future,
    )
    .unwrap();

    assert_eq!(count_id(&expanded, 1), 0);
    assert_eq!(count_id(&expanded, 3), 1);
    assert_eq!(count_id(&expanded, 5), 2);
}

#[test]
fn instance_limit_fails_the_list() {
    let result = append_recurrence_instances_at(
        events_from_api(),
        now(),
        true,
        &ExpansionOptions::default().with_max_instances(3),
        TimePerspectiveFilter::Future,
    );
    assert!(result.is_err());
}

#[test]
fn build_schedule_orders_ascending() {
    let schedule = build_schedule(
        events_from_api(),
        &ScheduleConfig::default(),
        now(),
        SortDirection::Asc,
    )
    .unwrap();

    let keys: Vec<_> = schedule.iter().map(Event::sort_key).collect();
    assert!(keys.windows(2).all(|pair| pair[0] <= pair[1]));
    // The timeless event sorts by its creation date, ahead of every meeting
    assert_eq!(schedule[0].id().as_u128(), 4);
    // Monday standup at 09:00 precedes the planning meeting at 14:00
    assert_eq!(schedule[1].id().as_u128(), 5);
    assert_eq!(schedule[2].id().as_u128(), 3);
}

#[test]
fn build_schedule_rejects_zero_month_window() {
    let config = ScheduleConfig {
        max_months: 0,
        ..ScheduleConfig::default()
    };
    assert!(build_schedule(events_from_api(), &config, now(), SortDirection::Asc).is_err());
}

#[test]
fn retain_invite_status_keeps_matching_events() {
    let pending = retain_invite_status(events_from_api(), InviteStatus::Pending);
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id().as_u128(), 3);
}

#[test]
fn descending_order_reverses_ascending() {
    let expanded = append_recurrence_instances_at(
        events_from_api(),
        now(),
        false,
        &ExpansionOptions::default(),
        TimePerspectiveFilter::Future,
    )
    .unwrap();

    let ascending = order_by_date(expanded, SortDirection::Asc);
    let mut descending = order_by_date(ascending.clone(), SortDirection::Desc);
    descending.reverse();
    assert_eq!(descending, ascending);
}

fn timed(n: u128, start: DateTime<Utc>) -> Event {
    Event::Single(TimedEvent {
        info: EventInfo {
            id: uuid::Uuid::from_u128(n),
            title: format!("Meeting {n}"),
            description: String::new(),
            created_at: start - TimeDelta::days(7),
            invite_status: InviteStatus::Accepted,
            extra: serde_json::Map::new(),
        },
        starts_at: DateTimeTz::new(start, chrono_tz::UTC),
        ends_at: DateTimeTz::new(start + TimeDelta::minutes(30), chrono_tz::UTC),
    })
}

proptest! {
    #[test]
    fn prop_desc_is_exact_reverse_of_asc(
        offsets in proptest::collection::hash_set(0i64..10_000_000, 0..40),
    ) {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let events: Vec<Event> = offsets
            .into_iter()
            .enumerate()
            .map(|(n, offset)| timed(n as u128, base + TimeDelta::seconds(offset)))
            .collect();

        let ascending = order_by_date(events.clone(), SortDirection::Asc);
        let descending = order_by_date(events, SortDirection::Desc);

        let mut reversed = descending.clone();
        reversed.reverse();
        prop_assert_eq!(&reversed, &ascending);
        prop_assert_eq!(
            order_by_date(ascending, SortDirection::Desc),
            descending
        );
    }
}
