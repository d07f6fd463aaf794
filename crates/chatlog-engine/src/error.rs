use std::fmt;

/// Result type for chatlog-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the engine layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Session's agent declares a category the reconstructor cannot handle
    Category(chatlog_types::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Category(err) => write!(f, "Category error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Category(err) => Some(err),
        }
    }
}

impl From<chatlog_types::Error> for Error {
    fn from(err: chatlog_types::Error) -> Self {
        Error::Category(err)
    }
}
