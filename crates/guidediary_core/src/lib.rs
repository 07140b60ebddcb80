//! # Guide Diary Core
//!
//! Merging of Dolphin Guide diary files.
//!
//! This crate provides:
//! - [`Diary`], an in-memory collection with at most one entry per timestamp
//! - [`DiaryRewriter`], which ingests any number of diary files, classifies
//!   every entry as added, exact duplicate or time-clash, and writes a single
//!   chronologically ordered diary
//!
//! ## Usage
//!
//! ```
//! use guidediary_codec::{encode, Entry, Timestamp, Trailer};
//! use guidediary_core::DiaryRewriter;
//!
//! let ts = Timestamp::new(2006, 1, 9, 15).unwrap();
//! let file = encode(&[Entry::from_text(ts, "Dentist").unwrap()], Trailer::Truncated);
//!
//! let mut rewriter = DiaryRewriter::new();
//! rewriter.ingest_bytes(&file, "home.gcal").unwrap();
//! rewriter.ingest_bytes(&file, "work.gcal").unwrap();
//!
//! let stats = rewriter.stats().unwrap();
//! assert_eq!((stats.found, stats.added, stats.exact_dups), (2, 1, 1));
//!
//! let mut merged = Vec::new();
//! rewriter.emit(&mut merged).unwrap();
//! assert_eq!(merged, file);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod diary;
mod error;
mod rewriter;

pub use config::{RewriterConfig, TimeclashResolution};
pub use diary::{Diary, Diff, EntryDump, InsertOptions, InsertOutcome};
pub use error::{CoreError, CoreResult};
pub use rewriter::{check_strictly_increasing, DiaryRewriter, IngestReport, RewriteStats};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
