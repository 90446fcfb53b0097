use fixtura_calendar::CalendarError;
use thiserror::Error;

/// Errors emitted while configuring builders or generating instances.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("format error: {0}")]
    Format(String),
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("logging error: {0}")]
    Logging(String),
}

impl GenerationError {
    /// Prefixes the message with the field being populated.
    pub(crate) fn in_field(self, model: &str, field: &str) -> Self {
        match self {
            Self::InvalidArgument(message) => {
                Self::InvalidArgument(format!("{model}.{field}: {message}"))
            }
            Self::Format(message) => Self::Format(format!("{model}.{field}: {message}")),
            Self::Configuration(message) => {
                Self::Configuration(format!("{model}.{field}: {message}"))
            }
            other => other,
        }
    }
}

impl From<fixtura_core::Error> for GenerationError {
    fn from(err: fixtura_core::Error) -> Self {
        match err {
            fixtura_core::Error::InvalidArgument(message) => Self::InvalidArgument(message),
            fixtura_core::Error::Format(message) => Self::Format(message),
            fixtura_core::Error::Configuration(message) => Self::Configuration(message),
        }
    }
}

impl From<CalendarError> for GenerationError {
    fn from(err: CalendarError) -> Self {
        match err {
            CalendarError::InvalidArgument(message) => Self::InvalidArgument(message),
            CalendarError::Format(message) => Self::Format(message),
        }
    }
}

pub type Result<T> = std::result::Result<T, GenerationError>;
