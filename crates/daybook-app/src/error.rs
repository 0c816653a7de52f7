use salvo::http::{ParseError, StatusCode};
use thiserror::Error;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] ParseError),

    #[error("Resulting range {0} has a year outside 0000..=9999")]
    UnrepresentableResult(daybook_calendar::Range),

    #[error("Requested span of {requested} days exceeds the limit of {limit} days")]
    SpanLimitExceeded { requested: u64, limit: u64 },

    #[error(transparent)]
    CoreError(#[from] daybook_core::error::CoreError),
}

impl AppError {
    /// ## Summary
    /// Returns the HTTP status this error is reported with.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::SpanLimitExceeded { .. } | Self::UnrepresentableResult(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::CoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
