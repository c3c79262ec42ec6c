//! Spill stream error types.

use std::path::PathBuf;

/// Errors from writing or restreaming spilled itineraries.
#[derive(Debug, thiserror::Error)]
pub enum SpillError {
    /// A stream file could not be opened or created
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Read or write failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A bulk size of zero would never make progress
    #[error("bulk size must be at least 1")]
    ZeroBulkSize,

    /// A stream ended before the header said it would
    #[error("{stream} ended early")]
    Truncated { stream: &'static str },

    /// Spilled lists are limited to 32-bit leg counts
    #[error("itinerary {index} has too many legs to spill")]
    TooManyLegs { index: usize },
}
