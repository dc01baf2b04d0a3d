//! RRULE handling for OpenTalk meetings.
//!
//! Recurrence semantics are delegated to the `rrule` crate; this crate anchors
//! rules to meeting start times, bounds them by the dashboard's time window
//! and maps occurrences back onto meeting records.

pub mod error;
pub mod expand;
pub mod pattern;

pub use error::{RecurrenceError, RecurrenceResult};
pub use expand::{ExpansionOptions, expand, expand_at, occurrences_in_window};
pub use pattern::{Frequency, RecurrenceEnd, RecurrencePattern};
