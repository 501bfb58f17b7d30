//! Everyday Core - Entry and Table Types
//!
//! Pure data structures shared by the index engine and the command line
//! front end. The only behavior here is submission validation, which is a
//! pure function of the raw input and the table configuration.

mod column;
mod config;
mod entry;
mod error;

pub use column::*;
pub use config::*;
pub use entry::*;
pub use error::*;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Unicode non-breaking hyphen used in date notation.
pub const HYPHEN: char = '\u{2011}';

/// Default start marker of the managed table region.
pub const INDEX_START: &str =
    "<!-- Index Start - WARNING: Do not delete or modify this markdown comment. -->";

/// Default end marker of the managed table region.
pub const INDEX_END: &str =
    "<!-- Index End - WARNING: Do not delete or modify this markdown comment. -->";

/// Zero-padded width of the first sequential identifier.
pub const DEFAULT_SEQUENCE_WIDTH: usize = 3;

// ============================================================================
// IDENTIFIERS
// ============================================================================

/// Leading label of a table row: a zero-padded counter or a formatted date.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Zero-padded sequential identifier, at least `width` digits wide.
    pub fn sequential(value: u64, width: usize) -> Self {
        Self(format!("{:0width$}", value, width = width))
    }

    /// Date identifier in `YYYY‑MM‑DD` notation.
    pub fn date(date: NaiveDate) -> Self {
        Self(format_date(date))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of a sequential identifier.
    pub fn sequence_value(&self) -> Option<u64> {
        parse_sequence(&self.0)
    }

    /// Calendar date of a date identifier.
    pub fn date_value(&self) -> Option<NaiveDate> {
        parse_date(&self.0)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Format a date with non-breaking hyphens, e.g. `2025‑01‑31`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(&format!("%Y{h}%m{h}%d", h = HYPHEN)).to_string()
}

/// Parse a date written with either non-breaking or ASCII hyphens.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let normalized = text.trim().replace(HYPHEN, "-");
    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d").ok()
}

/// Parse an all-digit sequential identifier.
pub fn parse_sequence(text: &str) -> Option<u64> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

// ============================================================================
// MARKERS
// ============================================================================

/// Which of the two sentinel markers an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerKind {
    Start,
    End,
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerKind::Start => f.write_str("start"),
            MarkerKind::End => f.write_str("end"),
        }
    }
}

/// Sentinel markers bounding the managed table region of a host document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markers {
    pub start: String,
    pub end: String,
}

impl Markers {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn get(&self, kind: MarkerKind) -> &str {
        match kind {
            MarkerKind::Start => &self.start,
            MarkerKind::End => &self.end,
        }
    }
}

impl Default for Markers {
    fn default() -> Self {
        Self::new(INDEX_START, INDEX_END)
    }
}

// ============================================================================
// TESTS
// ============================================================================
