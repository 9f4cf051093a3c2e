//! Error types for the warroom workspace.
//!
//! Per-source problems ([`WarRoomError::SourceUnavailable`] and
//! [`WarRoomError::MalformedField`]) are never fatal: the normalizer turns them
//! into an absent contribution. [`WarRoomError::Configuration`] is fatal and
//! stops an engine from being built at all.

use thiserror::Error;

/// The main error type for warroom operations.
#[derive(Debug, Error)]
pub enum WarRoomError {
    /// A source's record is missing or could not be read.
    #[error("Source unavailable: {source_id}: {reason}")]
    SourceUnavailable {
        /// Identifier of the affected source.
        source_id: String,
        /// Why the record could not be obtained.
        reason: String,
    },

    /// A numeric payload field is missing or does not hold a finite number.
    #[error("Malformed field '{field}' in {source_id} record: {reason}")]
    MalformedField {
        /// Identifier of the affected source.
        source_id: String,
        /// Name of the offending payload field.
        field: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The weight, rule or band table is invalid.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// A source identifier is not registered in the configuration.
    #[error("Unknown source: {0}")]
    UnknownSource(String),

    /// Filesystem error from a record store or config file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl WarRoomError {
    /// Shorthand for a [`WarRoomError::Configuration`] error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

impl From<String> for WarRoomError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for WarRoomError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for warroom operations.
pub type Result<T> = std::result::Result<T, WarRoomError>;
