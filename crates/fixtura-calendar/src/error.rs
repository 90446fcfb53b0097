use thiserror::Error;

/// Errors raised by calendar arithmetic and parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    /// A date component or bound is outside its legal range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Date text does not follow `YYYY/MM/DD`.
    #[error("format error: {0}")]
    Format(String),
}

/// Convenience alias for calendar results.
pub type Result<T> = std::result::Result<T, CalendarError>;
