//! Meeting events as delivered by the REST API and their typed form.
//!
//! ## Summary
//! [`EventResource`] mirrors the JSON shape of the API. [`Event`] is the
//! checked representation the schedule code works with: an event is either
//! timeless, a single timed meeting or a recurring timed meeting.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::types::InviteStatus;

/// Timestamp plus the IANA zone the meeting was scheduled in (wire form).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTimeTzResource {
    pub datetime: DateTime<Utc>,
    pub timezone: String,
}

/// Event record as serialized by the API.
///
/// Fields the schedule code does not interpret are kept in `extra` and written
/// back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventResource {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub invite_status: InviteStatus,
    #[serde(default)]
    pub is_time_independent: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<DateTimeTzResource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<DateTimeTzResource>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recurrence_pattern: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Resolved timestamp and zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeTz {
    pub datetime: DateTime<Utc>,
    pub timezone: Tz,
}

impl DateTimeTz {
    #[must_use]
    pub const fn new(datetime: DateTime<Utc>, timezone: Tz) -> Self {
        Self { datetime, timezone }
    }

    /// The instant expressed as wall-clock time in its own zone.
    #[must_use]
    pub fn local(&self) -> DateTime<Tz> {
        self.datetime.with_timezone(&self.timezone)
    }
}

impl TryFrom<DateTimeTzResource> for DateTimeTz {
    type Error = CoreError;

    fn try_from(value: DateTimeTzResource) -> CoreResult<Self> {
        let timezone = value
            .timezone
            .parse::<Tz>()
            .map_err(|_e| CoreError::InvalidTimezone(value.timezone.clone()))?;
        Ok(Self {
            datetime: value.datetime,
            timezone,
        })
    }
}

impl From<DateTimeTz> for DateTimeTzResource {
    fn from(value: DateTimeTz) -> Self {
        Self {
            datetime: value.datetime,
            timezone: value.timezone.name().to_string(),
        }
    }
}

/// Fields shared by every kind of event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventInfo {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub invite_status: InviteStatus,
    pub extra: Map<String, Value>,
}

/// Event with a fixed start and end.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedEvent {
    pub info: EventInfo,
    pub starts_at: DateTimeTz,
    pub ends_at: DateTimeTz,
}

/// Timed event repeating according to an RRULE.
#[derive(Debug, Clone, PartialEq)]
pub struct RecurringEvent {
    pub event: TimedEvent,
    /// RRULE strings; only the first one is evaluated.
    pub recurrence_pattern: Vec<String>,
}

impl RecurringEvent {
    /// The RRULE that drives expansion, if one is set.
    #[must_use]
    pub fn rule(&self) -> Option<&str> {
        self.recurrence_pattern
            .first()
            .map(String::as_str)
            .map(str::trim)
            .filter(|rule| !rule.is_empty())
    }
}

/// Checked event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EventResource", into = "EventResource")]
pub enum Event {
    Timeless(EventInfo),
    Single(TimedEvent),
    Recurring(RecurringEvent),
}

impl Event {
    #[must_use]
    pub const fn info(&self) -> &EventInfo {
        match self {
            Self::Timeless(info) => info,
            Self::Single(event) => &event.info,
            Self::Recurring(recurring) => &recurring.event.info,
        }
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.info().id
    }

    #[must_use]
    pub fn invite_status(&self) -> InviteStatus {
        self.info().invite_status
    }

    #[must_use]
    pub const fn is_time_independent(&self) -> bool {
        matches!(self, Self::Timeless(_))
    }

    /// Start and end of timed events.
    #[must_use]
    pub const fn timed(&self) -> Option<&TimedEvent> {
        match self {
            Self::Timeless(_) => None,
            Self::Single(event) => Some(event),
            Self::Recurring(recurring) => Some(&recurring.event),
        }
    }

    /// Instant used for chronological ordering: creation time for timeless
    /// events, start time otherwise.
    #[must_use]
    pub fn sort_key(&self) -> DateTime<Utc> {
        match self {
            Self::Timeless(info) => info.created_at,
            Self::Single(event) => event.starts_at.datetime,
            Self::Recurring(recurring) => recurring.event.starts_at.datetime,
        }
    }
}

impl TryFrom<EventResource> for Event {
    type Error = CoreError;

    fn try_from(resource: EventResource) -> CoreResult<Self> {
        let EventResource {
            id,
            title,
            description,
            created_at,
            invite_status,
            is_time_independent,
            starts_at,
            ends_at,
            recurrence_pattern,
            extra,
        } = resource;

        let info = EventInfo {
            id,
            title,
            description,
            created_at,
            invite_status,
            extra,
        };
        let has_rule = recurrence_pattern
            .first()
            .is_some_and(|rule| !rule.trim().is_empty());

        if is_time_independent {
            if starts_at.is_some() || ends_at.is_some() {
                return Err(CoreError::InvariantViolation(
                    "time-independent event carries a start or end time",
                ));
            }
            if has_rule {
                return Err(CoreError::InvariantViolation(
                    "time-independent event carries a recurrence pattern",
                ));
            }
            return Ok(Self::Timeless(info));
        }

        let (Some(starts_at), Some(ends_at)) = (starts_at, ends_at) else {
            return Err(CoreError::InvariantViolation(
                "time-dependent event is missing its start or end time",
            ));
        };
        let starts_at = DateTimeTz::try_from(starts_at)?;
        let ends_at = DateTimeTz::try_from(ends_at)?;

        if starts_at.timezone != ends_at.timezone {
            return Err(CoreError::ValidationError(format!(
                "event {id} starts in {} but ends in {}",
                starts_at.timezone, ends_at.timezone
            )));
        }
        if starts_at.datetime >= ends_at.datetime {
            return Err(CoreError::ValidationError(format!(
                "event {id} ends at {} which is not after its start {}",
                ends_at.datetime, starts_at.datetime
            )));
        }

        let event = TimedEvent {
            info,
            starts_at,
            ends_at,
        };

        if has_rule {
            Ok(Self::Recurring(RecurringEvent {
                event,
                recurrence_pattern,
            }))
        } else {
            Ok(Self::Single(event))
        }
    }
}

impl From<Event> for EventResource {
    fn from(event: Event) -> Self {
        let (info, times, recurrence_pattern) = match event {
            Event::Timeless(info) => (info, None, Vec::new()),
            Event::Single(event) => (
                event.info,
                Some((event.starts_at, event.ends_at)),
                Vec::new(),
            ),
            Event::Recurring(recurring) => (
                recurring.event.info,
                Some((recurring.event.starts_at, recurring.event.ends_at)),
                recurring.recurrence_pattern,
            ),
        };

        Self {
            id: info.id,
            title: info.title,
            description: info.description,
            created_at: info.created_at,
            invite_status: info.invite_status,
            is_time_independent: times.is_none(),
            starts_at: times.map(|(start, _)| start.into()),
            ends_at: times.map(|(_, end)| end.into()),
            recurrence_pattern,
            extra: info.extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const RECURRING_JSON: &str = r#"{
        "id": "00000000-0000-0000-0000-000000000001",
        "title": "Weekly sync",
        "description": "Team status",
        "created_at": "2024-01-10T08:00:00Z",
        "invite_status": "accepted",
        "is_time_independent": false,
        "starts_at": { "datetime": "2024-02-16T10:30:00Z", "timezone": "Europe/Berlin" },
        "ends_at": { "datetime": "2024-02-16T11:30:00Z", "timezone": "Europe/Berlin" },
        "recurrence_pattern": ["FREQ=WEEKLY"],
        "room": { "id": "room-1", "waiting_room": false },
        "is_favorite": true
    }"#;

    const TIMELESS_JSON: &str = r#"{
        "id": "00000000-0000-0000-0000-000000000002",
        "title": "Whenever",
        "created_at": "2024-01-11T08:00:00Z",
        "is_time_independent": true
    }"#;

    #[test_log::test]
    fn test_recurring_event_deserializes() {
        let event: Event = serde_json::from_str(RECURRING_JSON).unwrap();
        let Event::Recurring(recurring) = &event else {
            panic!("expected recurring event, got {event:?}");
        };

        assert_eq!(recurring.rule(), Some("FREQ=WEEKLY"));
        assert_eq!(recurring.event.starts_at.timezone, chrono_tz::Europe::Berlin);
        assert_eq!(
            event.sort_key(),
            Utc.with_ymd_and_hms(2024, 2, 16, 10, 30, 0).unwrap()
        );
        assert_eq!(event.info().extra.get("is_favorite"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_timeless_event_sorts_by_creation() {
        let event: Event = serde_json::from_str(TIMELESS_JSON).unwrap();
        assert!(event.is_time_independent());
        assert!(event.timed().is_none());
        assert_eq!(event.invite_status(), InviteStatus::Accepted);
        assert_eq!(
            event.sort_key(),
            Utc.with_ymd_and_hms(2024, 1, 11, 8, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_unknown_fields_survive_round_trip() {
        let event: Event = serde_json::from_str(RECURRING_JSON).unwrap();
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["room"]["id"], "room-1");
        assert_eq!(json["starts_at"]["timezone"], "Europe/Berlin");
        assert_eq!(json["recurrence_pattern"][0], "FREQ=WEEKLY");

        let back: Event = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_empty_pattern_is_single_event() {
        let mut resource: EventResource = serde_json::from_str(RECURRING_JSON).unwrap();
        resource.recurrence_pattern = vec![String::new()];
        let event = Event::try_from(resource).unwrap();
        assert!(matches!(event, Event::Single(_)));
    }

    #[test]
    fn test_missing_end_is_rejected() {
        let mut resource: EventResource = serde_json::from_str(RECURRING_JSON).unwrap();
        resource.ends_at = None;
        assert!(matches!(
            Event::try_from(resource),
            Err(CoreError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        let mut resource: EventResource = serde_json::from_str(RECURRING_JSON).unwrap();
        if let Some(ends_at) = resource.ends_at.as_mut() {
            ends_at.datetime = Utc.with_ymd_and_hms(2024, 2, 16, 10, 0, 0).unwrap();
        }
        assert!(matches!(
            Event::try_from(resource),
            Err(CoreError::ValidationError(_))
        ));
    }

    #[test]
    fn test_mismatched_timezones_are_rejected() {
        let mut resource: EventResource = serde_json::from_str(RECURRING_JSON).unwrap();
        if let Some(ends_at) = resource.ends_at.as_mut() {
            ends_at.timezone = "America/New_York".to_string();
        }
        assert!(matches!(
            Event::try_from(resource),
            Err(CoreError::ValidationError(_))
        ));
    }

    #[test]
    fn test_unknown_timezone_is_rejected() {
        let mut resource: EventResource = serde_json::from_str(RECURRING_JSON).unwrap();
        if let Some(starts_at) = resource.starts_at.as_mut() {
            starts_at.timezone = "Mars/Olympus_Mons".to_string();
        }
        assert!(matches!(
            Event::try_from(resource),
            Err(CoreError::InvalidTimezone(_))
        ));
    }

    #[test]
    fn test_timeless_with_times_is_rejected() {
        let mut resource: EventResource = serde_json::from_str(RECURRING_JSON).unwrap();
        resource.is_time_independent = true;
        assert!(matches!(
            Event::try_from(resource),
            Err(CoreError::InvariantViolation(_))
        ));
    }
}
