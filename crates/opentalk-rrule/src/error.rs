use thiserror::Error;
use uuid::Uuid;

use crate::expand::ConversionError;

/// Recurrence parsing and expansion errors
#[derive(Error, Debug)]
pub enum RecurrenceError {
    #[error("Event {0} has no recurrence pattern")]
    EmptyPattern(Uuid),

    #[error("Invalid recurrence rule: {0}")]
    Rule(#[from] rrule::RRuleError),

    #[error("Rule {rule} has more than {max_instances} occurrences in the window")]
    InstanceLimit { rule: String, max_instances: u16 },

    #[error("Unsupported recurrence pattern: {0}")]
    Unsupported(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    CoreError(#[from] opentalk_core::error::CoreError),
}

pub type RecurrenceResult<T> = std::result::Result<T, RecurrenceError>;
