//! Error types for diary merging.

use std::io;

use guidediary_codec::{CodecError, Entry, Timestamp};
use thiserror::Error;

use crate::diary::Diff;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur while merging and rewriting diaries.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A diary file failed structural validation.
    #[error("binary format error: {0}")]
    Codec(#[from] CodecError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Structured dump could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Two entries share a timestamp and no resolution was configured.
    #[error("duplicate timestamp {timestamp} with no time-clash resolution: {diff}")]
    DuplicateTimestamp {
        /// The shared timestamp.
        timestamp: Timestamp,
        /// The existing and incoming entries.
        diff: Box<Diff>,
    },

    /// A time-clash resolution strategy that is not implemented.
    #[error("unsupported time-clash resolution {name:?}, expected one of [\"older\"]")]
    UnsupportedResolution {
        /// The requested strategy.
        name: String,
    },

    /// Entries about to be written are not strictly increasing in time.
    #[error("duplicate or unordered timestamp: {entry} does not follow {previous}")]
    OrderingViolation {
        /// Timestamp of the preceding entry.
        previous: Timestamp,
        /// The offending entry.
        entry: Entry,
    },

    /// Ingestion counters disagree with the recorded entries.
    #[error("internal consistency error: {message}")]
    InternalConsistency {
        /// What disagreed.
        message: String,
    },
}

impl CoreError {
    /// Creates an unsupported resolution error.
    pub fn unsupported_resolution(name: impl Into<String>) -> Self {
        Self::UnsupportedResolution { name: name.into() }
    }

    /// Creates an internal consistency error.
    pub fn internal_consistency(message: impl Into<String>) -> Self {
        Self::InternalConsistency {
            message: message.into(),
        }
    }
}
