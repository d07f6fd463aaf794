use std::fmt;

/// Result type for chatlog-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the runtime layer
#[derive(Debug)]
pub enum Error {
    /// API client error (transport, parse, status)
    Client(chatlog_client::Error),

    /// IO operation failed
    Io(std::io::Error),

    /// CSV writing failed
    Csv(csv::Error),

    /// XLSX writing failed
    Xlsx(rust_xlsxwriter::XlsxError),

    /// Configuration error
    Config(String),

    /// Output path has no supported extension
    UnsupportedFormat(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Client(err) => write!(f, "API client error: {}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Csv(err) => write!(f, "CSV error: {}", err),
            Error::Xlsx(err) => write!(f, "XLSX error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::UnsupportedFormat(path) => write!(
                f,
                "Unsupported output format: {} (expected a .csv or .xlsx path)",
                path
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Client(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Csv(err) => Some(err),
            Error::Xlsx(err) => Some(err),
            Error::Config(_) | Error::UnsupportedFormat(_) => None,
        }
    }
}

impl From<chatlog_client::Error> for Error {
    fn from(err: chatlog_client::Error) -> Self {
        Error::Client(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err)
    }
}

impl From<rust_xlsxwriter::XlsxError> for Error {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Error::Xlsx(err)
    }
}
