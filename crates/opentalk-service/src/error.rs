use thiserror::Error;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    RecurrenceError(#[from] opentalk_rrule::error::RecurrenceError),

    #[error(transparent)]
    CoreError(#[from] opentalk_core::error::CoreError),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
