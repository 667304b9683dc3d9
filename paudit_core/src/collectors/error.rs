//! Error types for the collector module

use crate::command::CommandError;

/// Failures while resolving dates from patch details
#[derive(Debug, thiserror::Error)]
pub enum DateParseError {
    #[error("Unrecognized creation timestamp '{value}'")]
    UnrecognizedTimestamp { value: String },

    #[error("Invalid day/month/year date '{value}': {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::format::ParseError,
    },
}

/// Collector failures; there is no local recovery beyond the documented
/// sentinel fallbacks, everything else surfaces to the caller
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error("Command execution failed: {0}")]
    Command(#[from] CommandError),

    #[error("Date resolution failed: {0}")]
    Date(#[from] DateParseError),
}
