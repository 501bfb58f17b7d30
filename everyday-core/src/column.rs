//! Recognized column kinds and the 5/6 column layout

use serde::{Deserialize, Serialize};

/// The fixed set of column kinds an index table may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKind {
    /// Leading row identifier (always the first column)
    Identifier,
    /// Entry timestamp in date notation
    Date,
    /// Entry title, linked to its url when one is given
    Title,
    /// Link to the per-entry file
    Solution,
    /// Source the entry came from
    Site,
    /// Difficulty or status tag
    Difficulty,
    /// Optional configurable sixth column
    Extra,
}

impl ColumnKind {
    /// Map a header label to a column kind.
    ///
    /// `extra_name` is the configured extra column header, if enabled. It is
    /// matched before the built-in aliases so a custom name always wins.
    pub fn from_label(label: &str, extra_name: Option<&str>) -> Option<Self> {
        let label = label.trim();
        if let Some(name) = extra_name {
            if label.eq_ignore_ascii_case(name.trim()) {
                return Some(ColumnKind::Extra);
            }
        }
        let lowered = label.to_ascii_lowercase();
        match lowered.as_str() {
            "day" | "no." | "no" | "#" | "seq" | "id" => Some(ColumnKind::Identifier),
            "date" | "timestamp" => Some(ColumnKind::Date),
            "title" | "problem" => Some(ColumnKind::Title),
            "solution" | "file" | "entry" => Some(ColumnKind::Solution),
            "site" | "source" | "platform" => Some(ColumnKind::Site),
            "difficulty" | "status" | "level" | "tag" => Some(ColumnKind::Difficulty),
            _ => None,
        }
    }

    /// Default header label.
    pub fn default_label(&self) -> &'static str {
        match self {
            ColumnKind::Identifier => "Day",
            ColumnKind::Date => "Date",
            ColumnKind::Title => "Title",
            ColumnKind::Solution => "Solution",
            ColumnKind::Site => "Site",
            ColumnKind::Difficulty => "Difficulty",
            ColumnKind::Extra => "NB",
        }
    }
}

/// Column layout of the whole table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnLayout {
    /// Five columns
    Standard,
    /// Six columns, the last one carrying the named extra column
    WithExtra { name: String },
}

impl ColumnLayout {
    pub fn column_count(&self) -> usize {
        match self {
            ColumnLayout::Standard => 5,
            ColumnLayout::WithExtra { .. } => 6,
        }
    }

    pub fn extra_name(&self) -> Option<&str> {
        match self {
            ColumnLayout::Standard => None,
            ColumnLayout::WithExtra { name } => Some(name),
        }
    }

    pub fn has_extra(&self) -> bool {
        matches!(self, ColumnLayout::WithExtra { .. })
    }
}
