//! Record decoder.

use crate::entry::{Entry, Timestamp};
use crate::error::{CodecError, CodecResult};
use crate::layout::{
    Trailer, CONTENT_LEN, CONTENT_START, ENDMARK, ENDMARK_START, PREPAD, PREPAD_START,
    RECORD_LEN, ZEROEND, ZEROEND_START,
};

/// Decode a whole diary file into entries, in file order.
///
/// With [`Trailer::Truncated`] the final record's missing zero bytes are
/// restored before splitting. Any structural fault aborts the decode.
///
/// # Errors
///
/// Returns an error if the input is not a whole number of records or any
/// record fails validation.
pub fn decode(bytes: &[u8], trailer: Trailer) -> CodecResult<Vec<Entry>> {
    let mut decoder = RecordDecoder::new(bytes, trailer)?;
    let mut entries = Vec::with_capacity(decoder.record_count());
    while let Some(entry) = decoder.next_entry()? {
        entries.push(entry);
    }
    Ok(entries)
}

/// Decode a diary file, inferring the trailer convention from its length.
///
/// # Errors
///
/// See [`decode`].
pub fn decode_detect(bytes: &[u8]) -> CodecResult<Vec<Entry>> {
    decode(bytes, Trailer::detect(bytes.len()))
}

/// A record-at-a-time decoder over an in-memory diary file.
pub struct RecordDecoder<'a> {
    data: &'a [u8],
    tail: Option<[u8; RECORD_LEN]>,
    records: usize,
    index: usize,
}

impl<'a> RecordDecoder<'a> {
    /// Create a decoder, validating that the input splits into whole records.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::LengthMismatch`] if it does not.
    pub fn new(data: &'a [u8], trailer: Trailer) -> CodecResult<Self> {
        if data.is_empty() {
            return Ok(Self {
                data,
                tail: None,
                records: 0,
                index: 0,
            });
        }

        let len = data.len() + trailer.missing_bytes();
        if len % RECORD_LEN != 0 {
            return Err(CodecError::LengthMismatch {
                len,
                record_len: RECORD_LEN,
            });
        }
        let records = len / RECORD_LEN;

        // The last record is rebuilt with its missing bytes zero-filled so
        // the remaining records can be borrowed straight from the input.
        let (data, tail) = if trailer.missing_bytes() == 0 {
            (data, None)
        } else {
            let split = (records - 1) * RECORD_LEN;
            let mut last = [0u8; RECORD_LEN];
            last[..data.len() - split].copy_from_slice(&data[split..]);
            (&data[..split], Some(last))
        };

        Ok(Self {
            data,
            tail,
            records,
            index: 0,
        })
    }

    /// Total number of records in the input.
    pub fn record_count(&self) -> usize {
        self.records
    }

    /// Decode the next record, or `None` once every record has been read.
    ///
    /// # Errors
    ///
    /// Returns an error if the record fails validation.
    pub fn next_entry(&mut self) -> CodecResult<Option<Entry>> {
        if self.index >= self.records {
            return Ok(None);
        }
        let start = self.index * RECORD_LEN;
        let entry = if start < self.data.len() {
            decode_record(self.index, &self.data[start..start + RECORD_LEN])?
        } else {
            match &self.tail {
                Some(tail) => decode_record(self.index, tail)?,
                None => return Ok(None),
            }
        };
        self.index += 1;
        Ok(Some(entry))
    }
}

/// Decode a single record. `record` is its index, used in error reports.
///
/// # Errors
///
/// Returns an error if a constant field does not match or the timestamp is
/// not a valid date and hour.
pub fn decode_record(record: usize, bytes: &[u8]) -> CodecResult<Entry> {
    if bytes.len() != RECORD_LEN {
        return Err(CodecError::LengthMismatch {
            len: bytes.len(),
            record_len: RECORD_LEN,
        });
    }

    let field = |i: usize| read_u32(bytes, i * 4);
    let (year, month, day, hour) = (field(0), field(1), field(2), field(3));

    let prepad = &bytes[PREPAD_START..CONTENT_START];
    if prepad != PREPAD {
        return Err(CodecError::BadPrepad {
            record,
            found: prepad.to_vec(),
        });
    }
    let endmark = &bytes[ENDMARK_START..ZEROEND_START];
    if endmark != ENDMARK {
        return Err(CodecError::BadEndmark {
            record,
            found: endmark.to_vec(),
        });
    }
    let zeroend = &bytes[ZEROEND_START..];
    if zeroend != ZEROEND {
        return Err(CodecError::BadZeroend {
            record,
            found: zeroend.to_vec(),
        });
    }

    let timestamp =
        Timestamp::new(year, month, day, hour).ok_or(CodecError::InvalidTimestamp {
            record,
            year,
            month,
            day,
            hour,
        })?;

    let mut raw = [0u8; CONTENT_LEN];
    raw.copy_from_slice(&bytes[CONTENT_START..ENDMARK_START]);
    Ok(Entry::from_raw(timestamp, raw))
}

#[inline]
fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::encode;
    use crate::layout::DATE_LEN;

    fn record(year: u32, month: u32, day: u32, hour: u32, text: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(RECORD_LEN);
        for v in [year, month, day, hour] {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        bytes.extend_from_slice(&PREPAD);
        let mut content = [b' '; CONTENT_LEN];
        content[..text.len()].copy_from_slice(text);
        bytes.extend_from_slice(&content);
        bytes.extend_from_slice(&ENDMARK);
        bytes.extend_from_slice(&ZEROEND);
        bytes
    }

    #[test]
    fn decode_empty() {
        assert!(decode(&[], Trailer::Complete).unwrap().is_empty());
        assert!(decode(&[], Trailer::Truncated).unwrap().is_empty());
    }

    #[test]
    fn decode_single_record() {
        let bytes = record(2001, 9, 14, 10, b"Board meeting");
        let entries = decode(&bytes, Trailer::Complete).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].timestamp().parts(), (2001, 9, 14, 10));
        assert_eq!(entries[0].trimmed_text(), "Board meeting");
        assert_eq!(&entries[0].raw()[..], &bytes[CONTENT_START..ENDMARK_START]);
    }

    #[test]
    fn decode_truncated_file() {
        let mut bytes = record(2001, 9, 14, 10, b"first");
        bytes.extend(record(2001, 9, 15, 11, b"second"));
        bytes.truncate(bytes.len() - 2);

        let entries = decode(&bytes, Trailer::Truncated).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].trimmed_text(), "second");

        assert!(matches!(
            decode(&bytes, Trailer::Complete),
            Err(CodecError::LengthMismatch { .. })
        ));
        assert_eq!(decode_detect(&bytes).unwrap(), entries);
    }

    #[test]
    fn reject_partial_record() {
        assert!(matches!(
            decode(&[0u8; 420], Trailer::Complete),
            Err(CodecError::LengthMismatch { len: 420, .. })
        ));
        assert!(matches!(
            decode(&[0u8; 420], Trailer::Truncated),
            Err(CodecError::LengthMismatch { len: 422, .. })
        ));
        assert!(decode_detect(&[0u8; 420]).is_err());
    }

    #[test]
    fn reject_bad_prepad() {
        let mut bytes = record(2001, 1, 1, 0, b"x");
        bytes[DATE_LEN + 3] = b'_';
        assert!(matches!(
            decode(&bytes, Trailer::Complete),
            Err(CodecError::BadPrepad { record: 0, .. })
        ));
    }

    #[test]
    fn reject_bad_endmark() {
        let mut bytes = record(2001, 1, 1, 0, b"x");
        bytes.extend(record(2001, 1, 2, 0, b"y"));
        bytes[RECORD_LEN + ENDMARK_START] = 0x02;
        let err = decode(&bytes, Trailer::Complete).unwrap_err();
        assert!(matches!(err, CodecError::BadEndmark { record: 1, .. }));
        assert_eq!(err.record(), Some(1));
        assert!(err.is_binary_format());
    }

    #[test]
    fn reject_bad_zeroend() {
        let mut bytes = record(2001, 1, 1, 0, b"x");
        bytes[RECORD_LEN - 1] = 0xff;
        assert!(matches!(
            decode(&bytes, Trailer::Complete),
            Err(CodecError::BadZeroend { record: 0, .. })
        ));
    }

    #[test]
    fn reject_invalid_date() {
        let bytes = record(2001, 2, 30, 0, b"x");
        assert!(matches!(
            decode(&bytes, Trailer::Complete),
            Err(CodecError::InvalidTimestamp { day: 30, .. })
        ));
        let bytes = record(2001, 2, 1, 25, b"x");
        assert!(matches!(
            decode(&bytes, Trailer::Complete),
            Err(CodecError::InvalidTimestamp { hour: 25, .. })
        ));
    }

    #[test]
    fn decoder_counts_records() {
        let entries = vec![
            Entry::from_text(Timestamp::new(2010, 5, 1, 9).unwrap(), "a").unwrap(),
            Entry::from_text(Timestamp::new(2010, 5, 2, 9).unwrap(), "b").unwrap(),
            Entry::from_text(Timestamp::new(2010, 5, 3, 9).unwrap(), "c").unwrap(),
        ];
        let bytes = encode(&entries, Trailer::Truncated);
        let mut decoder = RecordDecoder::new(&bytes, Trailer::Truncated).unwrap();
        assert_eq!(decoder.record_count(), 3);
        let mut n = 0;
        while decoder.next_entry().unwrap().is_some() {
            n += 1;
        }
        assert_eq!(n, 3);
    }
}
