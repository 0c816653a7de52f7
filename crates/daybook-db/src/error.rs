use daybook_calendar::Date;
use thiserror::Error;

/// Database layer errors
#[derive(Error, Debug)]
pub enum DbError {
    /// A stored value could not be read back as a date.
    #[error("failed to scan Date: {0}")]
    Scan(String),

    /// A date whose year does not fit the four-digit text layout.
    #[error("date {0} cannot be stored as YYYY-MM-DD text")]
    Unrepresentable(Date),
}

pub type DbResult<T> = std::result::Result<T, DbError>;
