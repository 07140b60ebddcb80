//! Property tests for the record codec.

use guidediary_codec::{decode, decode_detect, encode, Entry, Timestamp, Trailer, CONTENT_LEN};
use proptest::prelude::*;

fn timestamp_strategy() -> impl Strategy<Value = Timestamp> {
    (1u32..=9999, 1u32..=12, 1u32..=28, 0u32..24)
        .prop_map(|(y, m, d, h)| Timestamp::new(y, m, d, h).unwrap())
}

fn entry_strategy() -> impl Strategy<Value = Entry> {
    (
        timestamp_strategy(),
        prop::collection::vec(any::<u8>(), CONTENT_LEN),
    )
        .prop_map(|(ts, bytes)| {
            let mut raw = [0u8; CONTENT_LEN];
            raw.copy_from_slice(&bytes);
            Entry::from_raw(ts, raw)
        })
}

proptest! {
    #[test]
    fn single_entry_roundtrip(entry in entry_strategy(), truncated in any::<bool>()) {
        let trailer = if truncated { Trailer::Truncated } else { Trailer::Complete };
        let decoded = decode(&encode(&[entry.clone()], trailer), trailer).unwrap();
        prop_assert_eq!(decoded.len(), 1);
        prop_assert_eq!(decoded[0].timestamp(), entry.timestamp());
        prop_assert_eq!(&decoded[0].raw()[..], &entry.raw()[..]);
        prop_assert_eq!(decoded[0].display_text(), entry.display_text());
    }

    #[test]
    fn detect_reads_either_trailer(entries in prop::collection::vec(entry_strategy(), 1..8)) {
        for trailer in [Trailer::Complete, Trailer::Truncated] {
            let decoded = decode_detect(&encode(&entries, trailer)).unwrap();
            prop_assert_eq!(decoded.len(), entries.len());
            for (a, b) in decoded.iter().zip(&entries) {
                prop_assert_eq!(&a.raw()[..], &b.raw()[..]);
            }
        }
    }

    #[test]
    fn partial_records_are_rejected(len in 1usize..4000) {
        prop_assume!(len % 576 != 0);
        prop_assert!(decode(&vec![0u8; len], Trailer::Complete).is_err());
    }
}
