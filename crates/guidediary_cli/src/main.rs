//! Guide Diary CLI
//!
//! Command-line tools for Dolphin Guide diary files.
//!
//! # Commands
//!
//! - `merge` - Merge diary files into one ordered diary
//! - `extract` - Dump the entries of a diary file
//! - `report` - Show what a merge would do without writing anything

mod commands;

use clap::{Parser, Subcommand};
use guidediary_codec::Trailer;
use guidediary_core::{RewriterConfig, TimeclashResolution};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Dolphin Guide diary tools.
#[derive(Parser)]
#[command(name = "guidediary")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by the commands that ingest diaries.
#[derive(clap::Args)]
struct IngestArgs {
    /// Trailer convention of the input files (complete, truncated); detected per file if omitted
    #[arg(long)]
    read_trailer: Option<Trailer>,

    /// Report exact duplicates as time-clashes instead of dropping them
    #[arg(long)]
    keep_duplicates: bool,

    /// Time-clash resolution (older, none)
    #[arg(long, default_value = "older")]
    resolution: String,
}

impl IngestArgs {
    fn config(&self) -> Result<RewriterConfig, Box<dyn std::error::Error>> {
        let resolution = match self.resolution.as_str() {
            "none" => None,
            name => Some(name.parse::<TimeclashResolution>()?),
        };
        Ok(RewriterConfig::new()
            .swallow_duplicates(!self.keep_duplicates)
            .timeclash_resolution(resolution)
            .read_trailer(self.read_trailer))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Merge diary files into one ordered diary
    Merge {
        /// Input diary files, ingested in order
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output diary file
        #[arg(short, long)]
        output: PathBuf,

        /// Write exact duplicates to this text file
        #[arg(long)]
        exact_dups: Option<PathBuf>,

        /// Write entries rejected by time-clashes to this text file
        #[arg(long)]
        not_added: Option<PathBuf>,

        /// Trailer convention of the output file
        #[arg(long, default_value = "truncated")]
        write_trailer: Trailer,

        #[command(flatten)]
        ingest: IngestArgs,
    },

    /// Dump the entries of a diary file
    Extract {
        /// Input diary file
        input: PathBuf,

        /// Sort entries by timestamp
        #[arg(short, long)]
        sorted: bool,

        /// Trailer convention of the input file; detected if omitted
        #[arg(long)]
        read_trailer: Option<Trailer>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show what merging the given files would do, without writing anything
    Report {
        /// Input diary files, ingested in order
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,

        #[command(flatten)]
        ingest: IngestArgs,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Merge {
            inputs,
            output,
            exact_dups,
            not_added,
            write_trailer,
            ingest,
        } => {
            let config = ingest.config()?.write_trailer(write_trailer);
            let reports = commands::merge::ReportFiles {
                exact_dups,
                not_added,
            };
            commands::merge::run(&inputs, &output, &reports, config)?;
        }
        Commands::Extract {
            input,
            sorted,
            read_trailer,
            format,
        } => {
            commands::extract::run(&input, read_trailer, sorted, &format)?;
        }
        Commands::Report {
            inputs,
            format,
            ingest,
        } => {
            commands::report::run(&inputs, ingest.config()?, &format)?;
        }
        Commands::Version => {
            println!("guidediary CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("guidediary core v{}", guidediary_core::VERSION);
        }
    }

    Ok(())
}
