use std::path::PathBuf;

/// Shardmerge error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid command-line arguments
    #[error("argument error: {0}")]
    Argument(String),

    /// File I/O error
    #[error("io error: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed XML while reading a document or writing the result
    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Input ended inside an open element
    #[error("unexpected end of document")]
    UnexpectedEof,

    /// Walker error.
    #[error("walk error: {message}")]
    Walk { message: String },

    /// Internal error (bug)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type using shardmerge Error
pub type Result<T> = std::result::Result<T, Error>;

/// Exit codes per CLI contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Merge completed, including the empty-input case
    Success = 0,
    /// Argument error (missing or unusable input directory)
    UsageError = 2,
    /// Internal error
    InternalError = 3,
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::Argument(_) => ExitCode::UsageError,
            Error::Io { .. } => ExitCode::InternalError,
            Error::Xml(_) | Error::UnexpectedEof => ExitCode::InternalError,
            Error::Walk { .. } => ExitCode::InternalError,
            Error::Internal(_) => ExitCode::InternalError,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
