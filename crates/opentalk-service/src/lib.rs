//! Schedule assembly for the meeting dashboard: splicing recurrence instances
//! into event lists, invite filtering and chronological ordering.

pub mod error;
pub mod schedule;
