//! Error types for CiteScout.
//!
//! Library crates use [`CiteScoutError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all CiteScout operations.
#[derive(Debug, thiserror::Error)]
pub enum CiteScoutError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Spreadsheet open or read error (missing file, unreadable workbook,
    /// missing worksheet).
    #[error("spreadsheet error: {0}")]
    Spreadsheet(String),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error (bad engine set, invalid option values, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, CiteScoutError>;

impl CiteScoutError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a spreadsheet error from any displayable message.
    pub fn spreadsheet(msg: impl Into<String>) -> Self {
        Self::Spreadsheet(msg.into())
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = CiteScoutError::config("no engines configured");
        assert_eq!(err.to_string(), "config error: no engines configured");

        let err = CiteScoutError::spreadsheet("input file not found: refs.xlsx");
        assert!(err.to_string().contains("refs.xlsx"));

        let err = CiteScoutError::validation("no primary search engine");
        assert!(err.to_string().contains("primary search engine"));
    }
}
