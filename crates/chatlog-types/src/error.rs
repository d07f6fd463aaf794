use std::fmt;

/// Result type for chatlog-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the types layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Agent context declares a category outside general/prompt/rag
    UnsupportedCategory(String),

    /// Agent context carries no category at all
    MissingCategory,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnsupportedCategory(value) => write!(
                f,
                "Unsupported category \"{}\" (expected one of: general, prompt, rag)",
                value
            ),
            Error::MissingCategory => write!(
                f,
                "Agent context has no category (expected one of: general, prompt, rag)"
            ),
        }
    }
}

impl std::error::Error for Error {}
