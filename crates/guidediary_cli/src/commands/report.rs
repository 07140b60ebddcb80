//! Report command implementation.

use guidediary_core::{DiaryRewriter, IngestReport, RewriteStats, RewriterConfig};
use serde::Serialize;
use std::path::PathBuf;

/// Merge report for output.
#[derive(Debug, Serialize)]
pub struct MergeReport {
    /// Per-file ingestion results, in ingestion order.
    pub files: Vec<IngestReport>,
    /// Totals across all files.
    pub stats: RewriteStats,
    /// Entries the merged diary would hold.
    pub merged_entries: usize,
    /// Time-clashes, ordered by timestamp.
    pub timeclashes: Vec<TimeclashInfo>,
}

/// One time-clash.
#[derive(Debug, Serialize)]
pub struct TimeclashInfo {
    /// ISO-8601 timestamp shared by both entries.
    pub date: String,
    /// Text of the entry that was kept.
    pub kept: String,
    /// Text of the entry that was rejected.
    pub rejected: String,
}

/// Runs the report command.
pub fn run(
    inputs: &[PathBuf],
    config: RewriterConfig,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = build_report(inputs, config)?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            print_text_output(&report);
        }
    }

    Ok(())
}

fn build_report(
    inputs: &[PathBuf],
    config: RewriterConfig,
) -> Result<MergeReport, Box<dyn std::error::Error>> {
    let mut rewriter = DiaryRewriter::with_config(config);
    let mut files = Vec::with_capacity(inputs.len());
    for input in inputs {
        files.push(rewriter.ingest_path(input)?);
    }

    // Fails on the same ordering violations a real merge would.
    rewriter.to_bytes()?;

    let timeclashes = rewriter
        .nonexact_duplicates()
        .into_iter()
        .map(|diff| TimeclashInfo {
            date: diff.existing.timestamp().to_iso8601(),
            kept: diff.existing.trimmed_text().to_string(),
            rejected: diff.incoming.trimmed_text().to_string(),
        })
        .collect();

    Ok(MergeReport {
        files,
        stats: rewriter.stats()?,
        merged_entries: rewriter.diary().len(),
        timeclashes,
    })
}

fn print_text_output(report: &MergeReport) {
    println!("Guide Diary Merge Report");
    println!("========================");
    println!();
    println!("Files:");
    for file in &report.files {
        println!(
            "  {} ({} bytes{}): {} entries, {} added, {} exact, {} clashing",
            file.source,
            file.bytes,
            if file.truncated { ", truncated" } else { "" },
            file.entries,
            file.added,
            file.exact_dups,
            file.nonexact_dups
        );
    }
    super::merge::print_stats(&report.stats);
    println!("Merged entries:     {}", report.merged_entries);

    if !report.timeclashes.is_empty() {
        println!();
        println!("Time-clashes:");
        for clash in &report.timeclashes {
            println!("  {}", clash.date);
            println!("    kept:     {}", clash.kept);
            println!("    rejected: {}", clash.rejected);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guidediary_testkit::prelude::*;

    #[test]
    fn report_lists_timeclashes() {
        let dir = DiaryDir::new();
        let a = dir.write_diary("a.gcal", &[entry(2017, 3, 9, 16, "Tea")], Trailer::Truncated);
        let b = dir.write_diary(
            "b.gcal",
            &[entry(2017, 3, 9, 16, "Coffee"), entry(2017, 3, 10, 8, "Run")],
            Trailer::Complete,
        );

        let report = build_report(&[a, b], RewriterConfig::default()).unwrap();
        assert_eq!(report.files.len(), 2);
        assert!(report.files[0].truncated);
        assert_eq!(report.merged_entries, 2);
        assert_eq!(report.stats.nonexact_dups, 1);
        assert_eq!(report.timeclashes[0].kept, "Tea");
        assert_eq!(report.timeclashes[0].rejected, "Coffee");
        assert_eq!(report.timeclashes[0].date, "2017-03-09T16:00:00");
    }
}
