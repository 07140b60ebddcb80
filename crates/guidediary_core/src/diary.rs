//! In-memory diary with per-timestamp uniqueness.

use std::fmt;

use guidediary_codec::Entry;
use serde::Serialize;
use tracing::debug;

use crate::config::TimeclashResolution;
use crate::error::{CoreError, CoreResult};

/// Two entries that share a timestamp but not their text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diff {
    /// The entry already in the diary.
    pub existing: Entry,
    /// The entry that was turned away.
    pub incoming: Entry,
}

impl fmt::Display for Diff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} kept {:?}, rejected {:?}",
            self.existing.timestamp(),
            self.existing.trimmed_text(),
            self.incoming.trimmed_text()
        )
    }
}

/// Options for [`Diary::insert`].
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertOptions {
    /// Ignore an incoming entry equal to the one already at its timestamp.
    pub swallow_exact_duplicates: bool,
    /// Resolution for a differing entry at an occupied timestamp.
    pub timeclash_resolution: Option<TimeclashResolution>,
}

/// What happened to an entry offered to [`Diary::insert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The entry was added.
    Added,
    /// An equal entry already holds the timestamp; nothing was added.
    ExactDuplicateIgnored,
    /// A different entry holds the timestamp; the newcomer was not added.
    TimeClash(Diff),
}

/// One entry of the structured dump.
#[derive(Debug, Clone, Serialize)]
pub struct EntryDump {
    /// ISO-8601 date and hour.
    pub date: String,
    /// Trimmed display text.
    pub text: String,
    /// Hex encoding of the raw content field.
    pub raw: String,
}

impl From<&Entry> for EntryDump {
    fn from(entry: &Entry) -> Self {
        Self {
            date: entry.timestamp().to_iso8601(),
            text: entry.trimmed_text().to_string(),
            raw: hex::encode(entry.raw()),
        }
    }
}

/// A collection of entries in which no two share a timestamp.
///
/// Entries are kept in insertion order; the diary only grows.
#[derive(Debug, Clone, Default)]
pub struct Diary {
    entries: Vec<Entry>,
}

impl Diary {
    /// Creates an empty diary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Offers an entry to the diary.
    ///
    /// The entry is added only if no entry with the same timestamp exists.
    /// Otherwise it is either swallowed as an exact duplicate or reported
    /// as a time-clash, according to `options`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DuplicateTimestamp`] on a time-clash when
    /// `options.timeclash_resolution` is `None`. An unset resolution is not
    /// [`CoreError::UnsupportedResolution`]; that error only comes from
    /// parsing an unknown strategy name.
    pub fn insert(&mut self, entry: Entry, options: InsertOptions) -> CoreResult<InsertOutcome> {
        debug!(entry = %entry, "accepting entry");

        let Some(existing) = self
            .entries
            .iter()
            .find(|e| e.timestamp() == entry.timestamp())
        else {
            self.entries.push(entry);
            return Ok(InsertOutcome::Added);
        };

        if options.swallow_exact_duplicates && *existing == entry {
            debug!("ignoring exact match");
            return Ok(InsertOutcome::ExactDuplicateIgnored);
        }

        let diff = Diff {
            existing: existing.clone(),
            incoming: entry,
        };
        match options.timeclash_resolution {
            Some(TimeclashResolution::Older) => Ok(InsertOutcome::TimeClash(diff)),
            None => Err(CoreError::DuplicateTimestamp {
                timestamp: diff.existing.timestamp(),
                diff: Box::new(diff),
            }),
        }
    }

    /// Drops every entry added after the first `len`.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Entries in ascending timestamp order.
    pub fn sorted_entries(&self) -> Vec<Entry> {
        let mut sorted = self.entries.clone();
        sorted.sort_by_key(Entry::timestamp);
        sorted
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the diary has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Structured dump in insertion order.
    pub fn serialize(&self) -> Vec<EntryDump> {
        self.entries.iter().map(EntryDump::from).collect()
    }

    /// Structured dump as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(&self.serialize())?)
    }

    #[cfg(test)]
    pub(crate) fn push_unchecked(&mut self, entry: Entry) {
        self.entries.push(entry);
    }
}
