use fixtura_calendar::CalendarError;
use thiserror::Error;

/// Core error type shared across Fixtura crates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A value or bound is outside its legal range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Text could not be parsed.
    #[error("format error: {0}")]
    Format(String),
    /// A field, directive or rule does not fit the model it targets.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<CalendarError> for Error {
    fn from(err: CalendarError) -> Self {
        match err {
            CalendarError::InvalidArgument(message) => Self::InvalidArgument(message),
            CalendarError::Format(message) => Self::Format(message),
        }
    }
}

/// Convenience alias for results returned by Fixtura crates.
pub type Result<T> = std::result::Result<T, Error>;
