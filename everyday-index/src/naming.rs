//! Per-entry file naming

use crate::document::TableRow;
use everyday_core::Identifier;
use once_cell::sync::Lazy;
use regex::Regex;

static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9\s-]").expect("Invalid slug regex"));

static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s-]").expect("Invalid separator regex"));

/// Ordinal of a new entry among rows that share its identifier, starting at 1.
pub fn sequence_suffix(rows: &[TableRow], identifier: &Identifier) -> usize {
    rows.iter()
        .filter(|row| row.identifier() == identifier.as_str())
        .count()
        + 1
}

/// Identifier plus two-digit suffix, e.g. `001_01`.
pub fn full_sequence(identifier: &Identifier, suffix: usize) -> String {
    format!("{}_{:02}", identifier, suffix)
}

/// Lower-case, underscore-separated form of a title.
pub fn slugify(title: &str) -> String {
    let lowered = title.trim().to_lowercase();
    let kept = DISALLOWED.replace_all(&lowered, "");
    SEPARATORS.replace_all(kept.trim(), "_").into_owned()
}

/// File name of an entry: `<seq_full>_<slug>.md`.
pub fn entry_filename(seq_full: &str, title: &str) -> String {
    let slug = slugify(title);
    if slug.is_empty() {
        format!("{}.md", seq_full)
    } else {
        format!("{}_{}.md", seq_full, slug)
    }
}
