//! Merge command implementation.

use guidediary_core::{DiaryRewriter, RewriteStats, RewriterConfig};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;

/// Optional text reports written alongside the merged diary.
#[derive(Debug, Default)]
pub struct ReportFiles {
    /// Destination for exact duplicates.
    pub exact_dups: Option<PathBuf>,
    /// Destination for entries rejected by time-clashes.
    pub not_added: Option<PathBuf>,
}

/// Runs the merge command.
pub fn run(
    inputs: &[PathBuf],
    output: &Path,
    reports: &ReportFiles,
    config: RewriterConfig,
) -> Result<RewriteStats, Box<dyn std::error::Error>> {
    let mut rewriter = DiaryRewriter::with_config(config);

    for input in inputs {
        let report = rewriter.ingest_path(input)?;
        println!(
            "{}: {} entries, {} added, {} exact duplicates, {} time-clashes",
            report.source, report.entries, report.added, report.exact_dups, report.nonexact_dups
        );
    }

    let written = rewriter.emit_path(output)?;
    println!("Wrote {} entries to {}", written, output.display());

    if let Some(path) = &reports.exact_dups {
        rewriter.write_exact_duplicates(BufWriter::new(File::create(path)?))?;
        info!("Wrote exact duplicates to {:?}", path);
    }
    if let Some(path) = &reports.not_added {
        rewriter.write_rejected(BufWriter::new(File::create(path)?))?;
        info!("Wrote rejected entries to {:?}", path);
    }

    let stats = rewriter.stats()?;
    print_stats(&stats);
    Ok(stats)
}

/// Prints merge totals.
pub fn print_stats(stats: &RewriteStats) {
    println!();
    println!("Entries found:      {}", stats.found);
    println!("Entries added:      {}", stats.added);
    println!("Exact duplicates:   {}", stats.exact_dups);
    println!("Time-clashes:       {}", stats.nonexact_dups);
}
