//! Merging diary files into one canonical diary.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use guidediary_codec::{decode, encode, Entry, Timestamp, Trailer, RECORD_LEN};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::RewriterConfig;
use crate::diary::{Diary, Diff, InsertOptions, InsertOutcome};
use crate::error::{CoreError, CoreResult};

/// Running totals across every ingested file.
///
/// Always satisfies `added == found - exact_dups - nonexact_dups`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RewriteStats {
    /// Entries read from input files.
    pub found: usize,
    /// Entries dropped as exact duplicates.
    pub exact_dups: usize,
    /// Entries rejected because of a time-clash.
    pub nonexact_dups: usize,
    /// Entries added to the diary.
    pub added: usize,
}

/// Outcome of ingesting a single file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    /// Name of the input, for diagnostics.
    pub source: String,
    /// Bytes read.
    pub bytes: usize,
    /// Whether the input ended two bytes short.
    pub truncated: bool,
    /// Entries decoded.
    pub entries: usize,
    /// Entries added to the diary.
    pub added: usize,
    /// Entries dropped as exact duplicates.
    pub exact_dups: usize,
    /// Entries rejected because of a time-clash.
    pub nonexact_dups: usize,
}

enum Disposition {
    Added,
    ExactDuplicate,
    TimeClash,
}

/// Lengths and totals to restore when a file fails part-way.
struct Checkpoint {
    diary_len: usize,
    exact_len: usize,
    rejected_len: usize,
    diffs_len: usize,
    stats: RewriteStats,
}

/// Ingests diary files into one [`Diary`], classifying every entry, and
/// writes the result back out in timestamp order.
#[derive(Debug, Default)]
pub struct DiaryRewriter {
    config: RewriterConfig,
    diary: Diary,
    exact_duplicates: Vec<Entry>,
    rejected: Vec<Entry>,
    diffs: Vec<Diff>,
    stats: RewriteStats,
}

impl DiaryRewriter {
    /// Creates a rewriter with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a rewriter with the given configuration.
    pub fn with_config(config: RewriterConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &RewriterConfig {
        &self.config
    }

    /// Reads a whole stream and ingests it.
    ///
    /// # Errors
    ///
    /// See [`DiaryRewriter::ingest_bytes`].
    pub fn ingest<R: Read>(&mut self, mut reader: R, source: &str) -> CoreResult<IngestReport> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.ingest_bytes(&bytes, source)
    }

    /// Reads a file and ingests it.
    ///
    /// # Errors
    ///
    /// See [`DiaryRewriter::ingest_bytes`].
    pub fn ingest_path(&mut self, path: &Path) -> CoreResult<IngestReport> {
        let bytes = fs::read(path)?;
        self.ingest_bytes(&bytes, &path.display().to_string())
    }

    /// Decodes a diary file and offers each entry to the diary in file order.
    ///
    /// Exact duplicates are recorded and dropped. A time-clash keeps the
    /// entry already present and records the newcomer, unless an equal
    /// newcomer was already rejected, in which case it counts as an exact
    /// duplicate.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not decode or if a time-clash
    /// cannot be resolved. Either way nothing from the file is kept: entries
    /// already classified are rolled back and the totals are unchanged.
    pub fn ingest_bytes(&mut self, bytes: &[u8], source: &str) -> CoreResult<IngestReport> {
        let trailer = self
            .config
            .read_trailer
            .unwrap_or_else(|| Trailer::detect(bytes.len()));
        info!(
            source,
            bytes = bytes.len(),
            remainder = bytes.len() % RECORD_LEN,
            ?trailer,
            "reading diary"
        );
        let entries = decode(bytes, trailer)?;

        let mut report = IngestReport {
            source: source.to_string(),
            bytes: bytes.len(),
            truncated: trailer == Trailer::Truncated && !bytes.is_empty(),
            entries: entries.len(),
            ..IngestReport::default()
        };

        let checkpoint = self.checkpoint();
        for entry in entries {
            match self.ingest_entry(entry) {
                Ok(Disposition::Added) => report.added += 1,
                Ok(Disposition::ExactDuplicate) => report.exact_dups += 1,
                Ok(Disposition::TimeClash) => report.nonexact_dups += 1,
                Err(e) => {
                    warn!(source, error = %e, "rolling back diary");
                    self.rollback(checkpoint);
                    return Err(e);
                }
            }
        }

        info!(
            source,
            entries = report.entries,
            added = report.added,
            exact_dups = report.exact_dups,
            nonexact_dups = report.nonexact_dups,
            "ingested diary"
        );
        Ok(report)
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            diary_len: self.diary.len(),
            exact_len: self.exact_duplicates.len(),
            rejected_len: self.rejected.len(),
            diffs_len: self.diffs.len(),
            stats: self.stats,
        }
    }

    fn rollback(&mut self, checkpoint: Checkpoint) {
        self.diary.truncate(checkpoint.diary_len);
        self.exact_duplicates.truncate(checkpoint.exact_len);
        self.rejected.truncate(checkpoint.rejected_len);
        self.diffs.truncate(checkpoint.diffs_len);
        self.stats = checkpoint.stats;
    }

    fn ingest_entry(&mut self, entry: Entry) -> CoreResult<Disposition> {
        self.stats.found += 1;
        let options = InsertOptions {
            swallow_exact_duplicates: self.config.swallow_duplicates,
            timeclash_resolution: self.config.timeclash_resolution,
        };

        match self.diary.insert(entry.clone(), options)? {
            InsertOutcome::Added => {
                self.stats.added += 1;
                Ok(Disposition::Added)
            }
            InsertOutcome::ExactDuplicateIgnored => {
                self.exact_duplicates.push(entry);
                self.stats.exact_dups += 1;
                Ok(Disposition::ExactDuplicate)
            }
            InsertOutcome::TimeClash(diff) => {
                if self.rejected.contains(&diff.incoming) {
                    self.exact_duplicates.push(diff.incoming);
                    self.stats.exact_dups += 1;
                    Ok(Disposition::ExactDuplicate)
                } else {
                    warn!(%diff, "time-clash");
                    self.rejected.push(diff.incoming.clone());
                    self.diffs.push(diff);
                    self.stats.nonexact_dups += 1;
                    Ok(Disposition::TimeClash)
                }
            }
        }
    }

    /// Encodes the diary in timestamp order.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::OrderingViolation`] if two entries share a
    /// timestamp.
    pub fn to_bytes(&self) -> CoreResult<Vec<u8>> {
        let entries = self.diary.sorted_entries();
        check_strictly_increasing(&entries)?;
        Ok(encode(&entries, self.config.write_trailer))
    }

    /// Writes the diary in timestamp order and returns the entry count.
    ///
    /// The output is fully encoded before anything is written.
    ///
    /// # Errors
    ///
    /// Returns an error on an ordering violation or a failed write.
    pub fn emit<W: Write>(&self, mut writer: W) -> CoreResult<usize> {
        let bytes = self.to_bytes()?;
        writer.write_all(&bytes)?;
        writer.flush()?;
        info!(entries = self.diary.len(), bytes = bytes.len(), "wrote diary");
        Ok(self.diary.len())
    }

    /// Writes the diary to a file; see [`DiaryRewriter::emit`].
    ///
    /// # Errors
    ///
    /// Returns an error on an ordering violation or a failed write. The file
    /// is not created when the ordering check fails.
    pub fn emit_path(&self, path: &Path) -> CoreResult<usize> {
        let bytes = self.to_bytes()?;
        fs::write(path, &bytes)?;
        info!(
            path = %path.display(),
            entries = self.diary.len(),
            bytes = bytes.len(),
            "wrote diary"
        );
        Ok(self.diary.len())
    }

    /// Running totals, after checking them against the recorded entries.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InternalConsistency`] if the totals disagree.
    pub fn stats(&self) -> CoreResult<RewriteStats> {
        let s = self.stats;
        if s.exact_dups != self.exact_duplicates.len() {
            return Err(CoreError::internal_consistency(format!(
                "{} exact duplicates counted, {} recorded",
                s.exact_dups,
                self.exact_duplicates.len()
            )));
        }
        if s.nonexact_dups != self.rejected.len() || s.nonexact_dups != self.diffs.len() {
            return Err(CoreError::internal_consistency(format!(
                "{} time-clashes counted, {} rejected entries and {} diffs recorded",
                s.nonexact_dups,
                self.rejected.len(),
                self.diffs.len()
            )));
        }
        if s.found.checked_sub(s.exact_dups + s.nonexact_dups) != Some(s.added) {
            return Err(CoreError::internal_consistency(format!(
                "{} added but {} found, {} exact and {} non-exact duplicates",
                s.added, s.found, s.exact_dups, s.nonexact_dups
            )));
        }
        Ok(s)
    }

    /// The merged diary.
    pub fn diary(&self) -> &Diary {
        &self.diary
    }

    /// Entries dropped as exact duplicates, in timestamp order.
    pub fn exact_duplicates(&self) -> Vec<Entry> {
        sorted(&self.exact_duplicates)
    }

    /// Entries rejected by a time-clash, in timestamp order.
    pub fn rejected_timeclashes(&self) -> Vec<Entry> {
        sorted(&self.rejected)
    }

    /// Time-clash pairs, ordered by the kept entry's timestamp.
    pub fn nonexact_duplicates(&self) -> Vec<Diff> {
        let mut diffs = self.diffs.clone();
        diffs.sort_by_key(|d| d.existing.timestamp());
        diffs
    }

    /// Writes the exact duplicates as text blocks separated by blank lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn write_exact_duplicates<W: Write>(&self, writer: W) -> CoreResult<()> {
        write_text_blocks(writer, &self.exact_duplicates())
    }

    /// Writes the rejected time-clash entries as text blocks separated by
    /// blank lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn write_rejected<W: Write>(&self, writer: W) -> CoreResult<()> {
        write_text_blocks(writer, &self.rejected_timeclashes())
    }

    #[cfg(test)]
    pub(crate) fn diary_mut(&mut self) -> &mut Diary {
        &mut self.diary
    }
}

/// Checks that each entry is strictly later than the one before it.
///
/// # Errors
///
/// Returns [`CoreError::OrderingViolation`] at the first entry that is not.
pub fn check_strictly_increasing(entries: &[Entry]) -> CoreResult<()> {
    let mut previous = Timestamp::MIN;
    for entry in entries {
        if entry.timestamp() <= previous {
            return Err(CoreError::OrderingViolation {
                previous,
                entry: entry.clone(),
            });
        }
        previous = entry.timestamp();
    }
    Ok(())
}

fn sorted(entries: &[Entry]) -> Vec<Entry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by_key(Entry::timestamp);
    sorted
}

fn write_text_blocks<W: Write>(mut writer: W, entries: &[Entry]) -> CoreResult<()> {
    for entry in entries {
        writer.write_all(entry.as_text().as_bytes())?;
        writer.write_all(b"\n\n")?;
    }
    writer.flush()?;
    Ok(())
}
