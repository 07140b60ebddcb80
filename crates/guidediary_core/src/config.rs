//! Rewriter configuration.

use std::fmt;
use std::str::FromStr;

use guidediary_codec::Trailer;

use crate::error::CoreError;

/// How to settle two entries with the same timestamp but different text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeclashResolution {
    /// Keep the entry already in the diary and report the newcomer.
    Older,
}

impl FromStr for TimeclashResolution {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "older" => Ok(Self::Older),
            other => Err(CoreError::unsupported_resolution(other)),
        }
    }
}

impl fmt::Display for TimeclashResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Older => f.write_str("older"),
        }
    }
}

/// Configuration for a [`DiaryRewriter`](crate::DiaryRewriter).
#[derive(Debug, Clone)]
pub struct RewriterConfig {
    /// Drop incoming entries that exactly duplicate one already present.
    pub swallow_duplicates: bool,

    /// Resolution applied to time-clashes. `None` makes any clash an error.
    pub timeclash_resolution: Option<TimeclashResolution>,

    /// Trailer convention of input files. `None` infers it per file.
    pub read_trailer: Option<Trailer>,

    /// Trailer convention of the written file.
    pub write_trailer: Trailer,
}

impl Default for RewriterConfig {
    fn default() -> Self {
        Self {
            swallow_duplicates: true,
            timeclash_resolution: Some(TimeclashResolution::Older),
            read_trailer: None,
            write_trailer: Trailer::Truncated,
        }
    }
}

impl RewriterConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether exact duplicates are swallowed.
    #[must_use]
    pub const fn swallow_duplicates(mut self, value: bool) -> Self {
        self.swallow_duplicates = value;
        self
    }

    /// Sets the time-clash resolution.
    #[must_use]
    pub const fn timeclash_resolution(mut self, value: Option<TimeclashResolution>) -> Self {
        self.timeclash_resolution = value;
        self
    }

    /// Sets the input trailer convention.
    #[must_use]
    pub const fn read_trailer(mut self, value: Option<Trailer>) -> Self {
        self.read_trailer = value;
        self
    }

    /// Sets the output trailer convention.
    #[must_use]
    pub const fn write_trailer(mut self, value: Trailer) -> Self {
        self.write_trailer = value;
        self
    }
}
