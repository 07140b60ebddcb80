//! # Guide Diary Testkit
//!
//! Test utilities for guidediary.
//!
//! This crate provides:
//! - Entry fixtures and temporary diary files
//! - Property-based test generators using proptest
//!
//! ## Usage
//!
//! ```rust,ignore
//! use guidediary_testkit::prelude::*;
//!
//! #[test]
//! fn merge_two_files() {
//!     let dir = DiaryDir::new();
//!     let path = dir.write_diary("a.gcal", &[entry(2001, 1, 1, 9, "x")], Trailer::Truncated);
//!     // ... ingest `path`
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use guidediary_codec::Trailer;
}

pub use fixtures::*;
pub use generators::*;
