//! Property-based test generators using proptest.
//!
//! Provides strategies for generating random diary data
//! that maintains required invariants.

use guidediary_codec::{Entry, Timestamp, CONTENT_LEN};
use proptest::prelude::*;

/// Strategy for generating valid timestamps.
///
/// Days stop at 28 so every month is valid.
pub fn timestamp_strategy() -> impl Strategy<Value = Timestamp> {
    (1970u32..=2037, 1u32..=12, 1u32..=28, 0u32..24)
        .prop_map(|(y, m, d, h)| Timestamp::new(y, m, d, h).expect("Invalid generated timestamp"))
}

/// Strategy for generating short entry texts.
pub fn text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z][A-Za-z0-9 ]{0,40}").expect("Invalid regex")
}

/// Strategy for generating entries with text content.
pub fn entry_strategy() -> impl Strategy<Value = Entry> {
    (timestamp_strategy(), text_strategy()).prop_map(|(ts, text)| {
        Entry::from_text(ts, &text).expect("Generated text fits a record")
    })
}

/// Strategy for generating entries with arbitrary raw content bytes.
pub fn raw_entry_strategy() -> impl Strategy<Value = Entry> {
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

/// Strategy for generating entries that draw from a small pool of
/// timestamps and texts, so duplicates and time-clashes are common.
pub fn colliding_entries_strategy(max_len: usize) -> impl Strategy<Value = Vec<Entry>> {
    let entry = (0u32..6, prop::sample::select(vec!["Gym", "gym ", "Lunch", "Dentist"]))
        .prop_map(|(hour, text)| {
            let ts = Timestamp::new(2019, 7, 1, hour).expect("Invalid generated timestamp");
            Entry::from_text(ts, text).expect("Generated text fits a record")
        });
    prop::collection::vec(entry, 0..max_len)
}

/// Strategy for generating entries with pairwise distinct timestamps.
pub fn distinct_entries_strategy(max_len: usize) -> impl Strategy<Value = Vec<Entry>> {
    prop::collection::btree_map(timestamp_strategy(), text_strategy(), 0..max_len).prop_map(
        |map| {
            map.into_iter()
                .map(|(ts, text)| {
                    Entry::from_text(ts, &text).expect("Generated text fits a record")
                })
                .collect()
        },
    )
}
