use thiserror::Error;

/// Application-level errors (command line layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] opentalk_service::error::ServiceError),

    #[error(transparent)]
    RecurrenceError(#[from] opentalk_rrule::error::RecurrenceError),

    #[error(transparent)]
    CoreError(#[from] opentalk_core::error::CoreError),

    #[error("Failed to read {path}: {source}")]
    ReadError {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid event JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
