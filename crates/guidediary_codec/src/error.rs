//! Error types for the codec crate.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur during encoding or decoding.
///
/// The decode variants are all binary-format violations: they are fatal to
/// the decode call that produced them and no entries are returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Input does not split into whole records.
    #[error("input of {len} bytes is not a whole number of {record_len}-byte records")]
    LengthMismatch {
        /// Input length after any trailer adjustment.
        len: usize,
        /// Expected record length.
        record_len: usize,
    },

    /// The padding before the content is not all spaces.
    #[error("record {record}: bad prepadding {found:02x?}")]
    BadPrepad {
        /// Zero-based record index.
        record: usize,
        /// Bytes actually found.
        found: Vec<u8>,
    },

    /// The end marker is not `01 00`.
    #[error("record {record}: wrong end marker {found:02x?}")]
    BadEndmark {
        /// Zero-based record index.
        record: usize,
        /// Bytes actually found.
        found: Vec<u8>,
    },

    /// The trailing block is not all zeroes.
    #[error("record {record}: wrong zero end {found:02x?}")]
    BadZeroend {
        /// Zero-based record index.
        record: usize,
        /// Bytes actually found.
        found: Vec<u8>,
    },

    /// Year, month, day and hour do not form a valid date and hour.
    #[error("record {record}: invalid timestamp {year:04}-{month:02}-{day:02} {hour:02}h")]
    InvalidTimestamp {
        /// Zero-based record index.
        record: usize,
        /// Raw year field.
        year: u32,
        /// Raw month field.
        month: u32,
        /// Raw day field.
        day: u32,
        /// Raw hour field.
        hour: u32,
    },

    /// Text does not fit in the content field.
    #[error("content of {len} bytes exceeds the {max}-byte content field")]
    ContentTooLong {
        /// Encoded length of the text.
        len: usize,
        /// Content field length.
        max: usize,
    },

    /// Text contains a character outside the single-byte character set.
    #[error("character {ch:?} cannot be stored in a diary record")]
    Unencodable {
        /// The offending character.
        ch: char,
    },
}

impl CodecError {
    /// Returns true if this error came from validating binary input.
    pub fn is_binary_format(&self) -> bool {
        !matches!(self, Self::ContentTooLong { .. } | Self::Unencodable { .. })
    }

    /// Index of the offending record, if the error is tied to one.
    pub fn record(&self) -> Option<usize> {
        match self {
            Self::BadPrepad { record, .. }
            | Self::BadEndmark { record, .. }
            | Self::BadZeroend { record, .. }
            | Self::InvalidTimestamp { record, .. } => Some(*record),
            _ => None,
        }
    }
}
