//! Recurrence expansion for meeting events.
//!
//! This module turns a recurring meeting plus a time perspective into the
//! concrete meeting instances shown in the dashboard.

mod expander;
mod timezone;

pub use expander::{ExpansionOptions, expand, expand_at, occurrences_in_window};
pub use timezone::{ConversionError, localize, localize_lenient};
