use thiserror::Error;

/// Calendar value errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Input does not follow the `YYYY-MM-DD` layout.
    #[error("Invalid date format, expected YYYY-MM-DD: {0:?}")]
    InvalidFormat(String),

    /// Input follows the layout but is not a calendar date.
    #[error("Parse error: {0}")]
    Parse(#[from] chrono::ParseError),
}

pub type DateResult<T> = std::result::Result<T, DateError>;
