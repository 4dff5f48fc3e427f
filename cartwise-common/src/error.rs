//! Common error types for cartwise

use thiserror::Error;

/// Common result type for cartwise operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across cartwise crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV input
    #[error("CSV error at line {line}: {message}")]
    Csv { line: u64, message: String },

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        let line = e.position().map(|p| p.line()).unwrap_or(0);
        let message = e.to_string();
        match e.into_kind() {
            csv::ErrorKind::Io(io) => Error::Io(io),
            _ => Error::Csv { line, message },
        }
    }
}
