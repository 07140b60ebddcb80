//! Decoded diary entries.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::error::{CodecError, CodecResult};
use crate::layout::CONTENT_LEN;

/// Date and hour of a diary entry.
///
/// The record format has no minutes or seconds; those are always zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Sentinel that precedes every real timestamp.
    pub const MIN: Self = Self(NaiveDateTime::MIN);

    /// Builds a timestamp from raw record fields.
    ///
    /// Returns `None` unless the fields form a valid calendar date in
    /// years 1 through 9999 and an hour below 24.
    pub fn new(year: u32, month: u32, day: u32, hour: u32) -> Option<Self> {
        if !(1..=9999).contains(&year) {
            return None;
        }
        let year = i32::try_from(year).ok()?;
        NaiveDate::from_ymd_opt(year, month, day)?
            .and_hms_opt(hour, 0, 0)
            .map(Self)
    }

    /// Returns `(year, month, day, hour)` as stored in a record.
    pub fn parts(&self) -> (u32, u32, u32, u32) {
        (
            u32::try_from(self.0.year()).unwrap_or_default(),
            self.0.month(),
            self.0.day(),
            self.0.hour(),
        )
    }

    /// The underlying date-time.
    pub fn as_datetime(&self) -> NaiveDateTime {
        self.0
    }

    /// Formats as ISO-8601, e.g. `2004-03-07T14:00:00`.
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:00"))
    }
}

/// One diary entry: a timestamp and the content field of its record.
///
/// The raw content bytes are kept verbatim so a decoded entry re-encodes to
/// the identical record. `text` is derived from them for display and
/// duplicate detection only.
///
/// Two entries compare equal when their timestamps match and their texts
/// match after trimming padding and lowercasing. Chronological order is a
/// separate concern; sort on [`Entry::timestamp`].
#[derive(Debug, Clone)]
pub struct Entry {
    timestamp: Timestamp,
    raw: Box<[u8; CONTENT_LEN]>,
    text: String,
}

impl Entry {
    /// Creates an entry from a record's raw content field.
    pub fn from_raw(timestamp: Timestamp, raw: [u8; CONTENT_LEN]) -> Self {
        let text = decode_single_byte(&raw);
        Self {
            timestamp,
            raw: Box::new(raw),
            text,
        }
    }

    /// Creates an entry from text, zero-padding it to the content length.
    ///
    /// # Errors
    ///
    /// Returns an error if a character is outside U+0000..=U+00FF or the
    /// text is longer than the content field.
    pub fn from_text(timestamp: Timestamp, text: &str) -> CodecResult<Self> {
        let mut raw = [0u8; CONTENT_LEN];
        let mut len = 0;
        for ch in text.chars() {
            let byte = u8::try_from(u32::from(ch)).map_err(|_| CodecError::Unencodable { ch })?;
            if len == CONTENT_LEN {
                return Err(CodecError::ContentTooLong {
                    len: text.chars().count(),
                    max: CONTENT_LEN,
                });
            }
            raw[len] = byte;
            len += 1;
        }
        Ok(Self::from_raw(timestamp, raw))
    }

    /// The entry's timestamp; also its sort key.
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// The exact content bytes of the record, padding included.
    pub fn raw(&self) -> &[u8; CONTENT_LEN] {
        &self.raw
    }

    /// The content decoded as text, padding included.
    pub fn display_text(&self) -> &str {
        &self.text
    }

    /// The content with surrounding whitespace and NUL padding removed.
    pub fn trimmed_text(&self) -> &str {
        self.text.trim_matches(is_padding)
    }

    /// Key used for duplicate detection.
    pub fn normalized_text(&self) -> String {
        self.trimmed_text().to_lowercase()
    }

    /// Human-readable form: the timestamp on one line, then the text.
    pub fn as_text(&self) -> String {
        format!("{}\n{}", self.timestamp, self.trimmed_text())
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.timestamp == other.timestamp && self.normalized_text() == other.normalized_text()
    }
}

impl Eq for Entry {}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.timestamp, self.trimmed_text())
    }
}

fn is_padding(c: char) -> bool {
    c.is_whitespace() || c == '\0'
}

/// Latin-1: every byte maps to the code point of the same value.
fn decode_single_byte(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}
