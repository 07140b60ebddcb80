//! # Guide Diary Codec
//!
//! Encoding and decoding of Dolphin Guide diary files.
//!
//! A diary file is a flat sequence of fixed 576-byte records, each holding
//! one date-stamped entry. This crate guarantees:
//! - Strict structural validation of every record on read
//! - Byte-exact preservation of the content field across decode/encode
//! - Tolerance of the two-byte truncated trailer the organiser writes
//!
//! ## Usage
//!
//! ```
//! use guidediary_codec::{decode, encode, Entry, Timestamp, Trailer};
//!
//! let ts = Timestamp::new(2003, 11, 4, 9).unwrap();
//! let entry = Entry::from_text(ts, "Renew passport").unwrap();
//!
//! let bytes = encode(&[entry.clone()], Trailer::Truncated);
//! let decoded = decode(&bytes, Trailer::Truncated).unwrap();
//! assert_eq!(decoded, vec![entry]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod decoder;
mod encoder;
mod entry;
mod error;
pub mod layout;

pub use decoder::{decode, decode_detect, decode_record, RecordDecoder};
pub use encoder::{encode, RecordEncoder};
pub use entry::{Entry, Timestamp};
pub use error::{CodecError, CodecResult};
pub use layout::{Trailer, CONTENT_LEN, RECORD_LEN};

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(month: u32, day: u32, hour: u32, text: &str) -> Entry {
        Entry::from_text(Timestamp::new(2008, month, day, hour).unwrap(), text).unwrap()
    }

    #[test]
    fn roundtrip_preserves_raw_bytes() {
        let mut raw = [b' '; CONTENT_LEN];
        raw[..5].copy_from_slice(b"Hello");
        raw[400] = 0x00;
        raw[499] = 0xa3;
        let original = Entry::from_raw(Timestamp::new(2008, 2, 29, 23).unwrap(), raw);

        for trailer in [Trailer::Complete, Trailer::Truncated] {
            let decoded = decode(&encode(&[original.clone()], trailer), trailer).unwrap();
            assert_eq!(decoded.len(), 1);
            assert_eq!(decoded[0].raw(), original.raw());
            assert_eq!(decoded[0].timestamp(), original.timestamp());
        }
    }

    #[test]
    fn roundtrip_preserves_file_order() {
        let entries = vec![
            entry(5, 3, 12, "later"),
            entry(1, 1, 0, "earlier"),
            entry(5, 3, 12, "same hour"),
        ];
        let decoded = decode_detect(&encode(&entries, Trailer::Truncated)).unwrap();
        let texts: Vec<_> = decoded.iter().map(Entry::trimmed_text).collect();
        assert_eq!(texts, ["later", "earlier", "same hour"]);
    }

    #[test]
    fn reencoding_is_byte_identical() {
        let entries = vec![entry(7, 4, 10, "Parade"), entry(12, 25, 8, "Presents")];
        let bytes = encode(&entries, Trailer::Truncated);
        let decoded = decode(&bytes, Trailer::Truncated).unwrap();
        assert_eq!(encode(&decoded, Trailer::Truncated), bytes);
    }
}
