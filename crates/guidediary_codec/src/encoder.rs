//! Record encoder.

use crate::entry::Entry;
use crate::layout::{Trailer, ENDMARK, PREPAD, RECORD_LEN, ZEROEND};

/// Encode entries into a diary file, one record each, in the given order.
///
/// With [`Trailer::Truncated`] the last two zero bytes of the final record
/// are left off, matching files written by the organiser.
pub fn encode<'a, I>(entries: I, trailer: Trailer) -> Vec<u8>
where
    I: IntoIterator<Item = &'a Entry>,
{
    let mut encoder = RecordEncoder::new();
    for entry in entries {
        encoder.encode(entry);
    }
    encoder.finish(trailer)
}

/// Appends records to an in-memory buffer.
pub struct RecordEncoder {
    buffer: Vec<u8>,
}

impl RecordEncoder {
    /// Create a new encoder.
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Create a new encoder with room for `records` records.
    pub fn with_capacity(records: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(records * RECORD_LEN),
        }
    }

    /// Append one record.
    pub fn encode(&mut self, entry: &Entry) {
        let (year, month, day, hour) = entry.timestamp().parts();
        for field in [year, month, day, hour] {
            self.buffer.extend_from_slice(&field.to_le_bytes());
        }
        self.buffer.extend_from_slice(&PREPAD);
        self.buffer.extend_from_slice(entry.raw());
        self.buffer.extend_from_slice(&ENDMARK);
        self.buffer.extend_from_slice(&ZEROEND);
    }

    /// Number of complete records written so far.
    pub fn record_count(&self) -> usize {
        self.buffer.len() / RECORD_LEN
    }

    /// Get a reference to the encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Consume the encoder, applying the trailer convention to the last record.
    pub fn finish(mut self, trailer: Trailer) -> Vec<u8> {
        if !self.buffer.is_empty() {
            let len = self.buffer.len() - trailer.missing_bytes();
            self.buffer.truncate(len);
        }
        self.buffer
    }
}

impl Default for RecordEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Timestamp;
    use crate::layout::{CONTENT_LEN, CONTENT_START, ENDMARK_START, PREPAD_START};

    fn entry(day: u32, text: &str) -> Entry {
        Entry::from_text(Timestamp::new(2012, 6, day, 18).unwrap(), text).unwrap()
    }

    #[test]
    fn encode_nothing() {
        assert!(encode(std::iter::empty(), Trailer::Complete).is_empty());
        assert!(encode(std::iter::empty(), Trailer::Truncated).is_empty());
    }

    #[test]
    fn encode_layout() {
        let bytes = encode(&[entry(21, "Solstice")], Trailer::Complete);
        assert_eq!(bytes.len(), RECORD_LEN);
        assert_eq!(&bytes[0..4], &2012u32.to_le_bytes());
        assert_eq!(&bytes[4..8], &6u32.to_le_bytes());
        assert_eq!(&bytes[8..12], &21u32.to_le_bytes());
        assert_eq!(&bytes[12..16], &18u32.to_le_bytes());
        assert_eq!(&bytes[PREPAD_START..CONTENT_START], &PREPAD[..]);
        assert_eq!(&bytes[CONTENT_START..CONTENT_START + 8], b"Solstice");
        assert_eq!(bytes[ENDMARK_START - 1], 0);
        assert_eq!(&bytes[ENDMARK_START..ENDMARK_START + 2], &ENDMARK[..]);
        assert!(bytes[ENDMARK_START + 2..].iter().all(|&b| b == 0));
    }

    #[test]
    fn truncation_only_touches_final_record() {
        let entries = [entry(1, "a"), entry(2, "b")];
        let full = encode(&entries, Trailer::Complete);
        let short = encode(&entries, Trailer::Truncated);
        assert_eq!(full.len(), 2 * RECORD_LEN);
        assert_eq!(short.len(), 2 * RECORD_LEN - 2);
        assert_eq!(&full[..short.len()], &short[..]);
    }

    #[test]
    fn raw_content_is_copied_verbatim() {
        let mut raw = [0x20u8; CONTENT_LEN];
        raw[0] = 0xff;
        raw[CONTENT_LEN - 1] = 0x07;
        let e = Entry::from_raw(Timestamp::new(2012, 6, 1, 0).unwrap(), raw);
        let mut encoder = RecordEncoder::with_capacity(1);
        encoder.encode(&e);
        assert_eq!(encoder.record_count(), 1);
        assert_eq!(&encoder.as_bytes()[CONTENT_START..ENDMARK_START], &raw[..]);
    }
}
