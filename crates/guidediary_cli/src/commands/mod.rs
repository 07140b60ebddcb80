//! CLI command implementations.

pub mod extract;
pub mod merge;
pub mod report;
