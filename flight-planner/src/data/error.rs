//! Data file error types.

use std::path::PathBuf;

use crate::domain::{DomainError, TimeError};

/// Errors that can occur while loading flight or alliance files.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// File could not be opened
    #[error("cannot open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed delimited data
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Take-off or landing time is not a valid timestamp
    #[error("line {line}: {source}")]
    Time {
        line: u64,
        #[source]
        source: TimeError,
    },

    /// Cost field is not a number
    #[error("line {line}: invalid cost {value:?}")]
    Cost { line: u64, value: String },

    /// Loaded records violate a table invariant
    #[error(transparent)]
    Domain(#[from] DomainError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = LoadError::Cost {
            line: 4,
            value: "cheap".to_string(),
        };
        assert_eq!(err.to_string(), "line 4: invalid cost \"cheap\"");

        let err = LoadError::Domain(DomainError::NegativeDuration(2));
        assert_eq!(err.to_string(), "flight lands before it takes off (record 2)");
    }
}
