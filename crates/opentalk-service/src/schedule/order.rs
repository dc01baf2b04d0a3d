use opentalk_core::model::Event;
use opentalk_core::types::SortDirection;

/// ## Summary
/// Orders events chronologically by [`Event::sort_key`].
///
/// Timeless events sort by creation time, timed events by start. The sort is
/// stable, so events with equal keys keep their input order in both
/// directions.
#[must_use]
pub fn order_by_date(mut events: Vec<Event>, direction: SortDirection) -> Vec<Event> {
    match direction {
        SortDirection::Asc => events.sort_by_key(Event::sort_key),
        SortDirection::Desc => events.sort_by(|a, b| b.sort_key().cmp(&a.sort_key())),
    }
    events
}
