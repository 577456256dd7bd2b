use std::path::PathBuf;

/// All domain errors for adminlog.
///
/// Each variant provides enough context to diagnose the issue
/// without needing a debugger.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error(
        "Activity log unavailable: {path}\n\n  \
         {reason}\n  \
         Check the file permissions, or point --dir at another data directory."
    )]
    StorageUnavailable { path: PathBuf, reason: String },

    /// Raised by the line parser. The store reader skips the line instead
    /// of surfacing this to callers.
    #[error("Malformed log record at line {line}: {detail}")]
    MalformedRecord { line: usize, detail: String },

    #[error("Invalid argument: {detail}")]
    InvalidArgument { detail: String },

    #[error("Invalid date format: '{value}'. Expected {expected}")]
    InvalidDate {
        value: String,
        expected: &'static str,
    },

    #[error(
        "Invalid configuration: {detail}\n\n  \
         Check config.toml in the data directory."
    )]
    InvalidConfig { detail: String },

    #[error("Could not write activity log: {detail}")]
    StorageWriteFailed { detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LogError>;
