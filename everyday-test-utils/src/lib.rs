//! Everyday Test Utilities
//!
//! Centralized test infrastructure for the Everyday workspace:
//! - Proptest generators for table rows, host documents and submissions
//! - Test fixtures for common documents and configurations
//! - Custom assertions for table-specific validation

// Re-export core types for convenience
pub use everyday_core::{
    ColumnKind, ColumnLayout, EngineError, EngineResult, EntryRecord, Identifier,
    IdentifierMode, MarkerKind, Markers, ParseError, ProjectSettings, RawEntry, SequencingError,
    TableConfig, ValidationError, INDEX_END, INDEX_START,
};
pub use everyday_index::{TableDocument, TableRow};

use chrono::NaiveDate;

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for generating tables, documents and entries.

    use super::*;
    use everyday_index::LineEnding;
    use proptest::prelude::*;

    /// A generated host document together with the table it contains.
    #[derive(Debug, Clone)]
    pub struct GeneratedDocument {
        pub text: String,
        pub header: TableRow,
        pub rows: Vec<TableRow>,
        pub line_ending: LineEnding,
    }

    // === Cell Generators ===

    /// Markdown-safe cell text, trimmed, possibly empty.
    pub fn arb_cell_text() -> impl Strategy<Value = String> {
        prop_oneof![
            3 => "[A-Za-z0-9 ._()\\[\\]:/-]{0,20}",
            1 => "[a-zéüß\u{2011} ]{0,12}",
        ]
        .prop_map(|s| s.trim().to_string())
    }

    /// Non-empty header label.
    pub fn arb_label() -> impl Strategy<Value = String> {
        "[A-Z][a-z]{1,8}"
    }

    pub fn arb_line_ending() -> impl Strategy<Value = LineEnding> {
        prop_oneof![3 => Just(LineEnding::Lf), 1 => Just(LineEnding::CrLf)]
    }

    /// Free text outside the markers; never contains a marker.
    pub fn arb_outside_text() -> impl Strategy<Value = String> {
        "[A-Za-z0-9 #*.|\n]{0,60}"
    }

    // === Table Generators ===

    /// Header plus rows, all sharing one column count.
    pub fn arb_table() -> impl Strategy<Value = (TableRow, Vec<TableRow>)> {
        (2..7usize).prop_flat_map(|columns| {
            (
                prop::collection::vec(arb_label(), columns),
                prop::collection::vec(prop::collection::vec(arb_cell_text(), columns), 0..12),
            )
                .prop_map(|(header, rows)| {
                    (
                        TableRow::new(header),
                        rows.into_iter().map(TableRow::new).collect(),
                    )
                })
        })
    }

    /// A full host document whose table uses arbitrary, uneven padding.
    pub fn arb_document() -> impl Strategy<Value = GeneratedDocument> {
        (
            arb_table(),
            arb_outside_text(),
            arb_outside_text(),
            arb_line_ending(),
            any::<bool>(),
            any::<bool>(),
        )
            .prop_flat_map(|((header, rows), before, after, eol, lead, trail)| {
                let cells = (rows.len() + 2) * header.len();
                (
                    Just((header, rows, before, after, eol, lead, trail)),
                    prop::collection::vec((0..3usize, 0..3usize), cells),
                )
            })
            .prop_map(|((header, rows, before, after, eol, lead, trail), pads)| {
                let ending = eol.as_str();
                let mut pads = pads.into_iter();
                let mut next_pad = move || pads.next().unwrap_or((1, 1));

                let mut table = String::new();
                table.push_str(&ragged_line(header.cells(), &mut next_pad));
                table.push_str(ending);
                let separator: Vec<String> = header
                    .cells()
                    .iter()
                    .map(|_| {
                        let (extra, _) = next_pad();
                        "-".repeat(3 + extra)
                    })
                    .collect();
                table.push_str(&format!("| {} |", separator.join(" | ")));
                table.push_str(ending);
                for row in &rows {
                    table.push_str(&ragged_line(row.cells(), &mut next_pad));
                    table.push_str(ending);
                }

                let text = format!(
                    "{before}{start}{eol}{lead}{table}{trail}{end}{eol}{after}",
                    before = before,
                    start = INDEX_START,
                    eol = ending,
                    lead = if lead { ending } else { "" },
                    table = table,
                    trail = if trail { ending } else { "" },
                    end = INDEX_END,
                    after = after,
                );
                GeneratedDocument {
                    text,
                    header,
                    rows,
                    line_ending: eol,
                }
            })
    }

    fn ragged_line(cells: &[String], next_pad: &mut impl FnMut() -> (usize, usize)) -> String {
        let mut line = String::from("|");
        for cell in cells {
            let (left, right) = next_pad();
            line.push_str(&" ".repeat(left));
            line.push_str(cell);
            line.push_str(&" ".repeat(right));
            line.push('|');
        }
        line
    }

    // === Entry Generators ===

    /// Submission title that survives validation.
    pub fn arb_title() -> impl Strategy<Value = String> {
        "[A-Za-z][A-Za-z0-9 ]{0,30}".prop_map(|s| s.trim().to_string())
    }

    pub fn arb_difficulty() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None),
            Just(Some("Easy".to_string())),
            Just(Some("Medium".to_string())),
            Just(Some("Hard".to_string())),
        ]
    }

    /// Valid submission for the default site options.
    pub fn arb_raw_entry() -> impl Strategy<Value = RawEntry> {
        (
            arb_title(),
            prop::sample::select(vec!["Codewars", "DataLemur", "LeetCode"]),
            arb_difficulty(),
            proptest::option::of("https://example\\.com/[a-z]{1,10}"),
        )
            .prop_map(|(title, site, difficulty, url)| RawEntry {
                title: Some(title),
                site: Some(site.to_string()),
                difficulty,
                url,
                ..RawEntry::new(super::fixtures::sample_date())
            })
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built documents and configurations for common scenarios.

    use super::*;

    pub const STANDARD_HEADER: [&str; 5] = ["Day", "Title", "Solution", "Site", "Difficulty"];

    pub const DATED_HEADER: [&str; 5] = ["No.", "Date", "Title", "Site", "Status"];

    pub fn sample_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid fixture date")
    }

    /// Host document with outside prose around an unpadded table.
    pub fn readme(header: &[&str], rows: &[Vec<String>]) -> String {
        let mut out = String::from("# [ ] Everyday\n\nDaily practice log.\n\n");
        out.push_str(INDEX_START);
        out.push('\n');
        out.push_str(&format!("| {} |\n", header.join(" | ")));
        let separator: Vec<&str> = header.iter().map(|_| "---").collect();
        out.push_str(&format!("| {} |\n", separator.join(" | ")));
        for row in rows {
            out.push_str(&format!("| {} |\n", row.join(" | ")));
        }
        out.push_str(INDEX_END);
        out.push_str("\n\n## Notes\n\nKeep going.\n");
        out
    }

    /// Standard five-column document whose rows carry the given identifiers.
    pub fn readme_with_ids(ids: &[&str]) -> String {
        let rows: Vec<Vec<String>> = ids
            .iter()
            .map(|id| {
                vec![
                    id.to_string(),
                    format!("Problem {}", id),
                    format!("[Solution](solutions/{}_01_problem.md)", id),
                    "LeetCode".to_string(),
                    "Easy".to_string(),
                ]
            })
            .collect();
        readme(&STANDARD_HEADER, &rows)
    }

    pub fn config(settings: ProjectSettings) -> TableConfig {
        TableConfig::from_settings(&settings).expect("valid fixture settings")
    }

    pub fn sequential_config(allow_gaps: bool) -> TableConfig {
        config(ProjectSettings {
            seq_sparse: u8::from(allow_gaps),
            ..ProjectSettings::default()
        })
    }

    pub fn date_config() -> TableConfig {
        config(ProjectSettings {
            seq_notation: 1,
            ..ProjectSettings::default()
        })
    }

    pub fn extra_column_config(name: &str) -> TableConfig {
        config(ProjectSettings {
            nb: 1,
            nb_name: name.to_string(),
            ..ProjectSettings::default()
        })
    }

    pub fn raw_entry(title: &str, site: &str) -> RawEntry {
        RawEntry {
            title: Some(title.to_string()),
            site: Some(site.to_string()),
            ..RawEntry::new(sample_date())
        }
    }
}

// ============================================================================
// CUSTOM ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Assertion helpers for engine results and rendered documents.

    use super::*;
    use everyday_index::display_width;

    /// Assert that an EngineResult is a Validation error.
    #[track_caller]
    pub fn assert_validation_error<T: std::fmt::Debug>(result: &EngineResult<T>) {
        match result {
            Err(EngineError::Validation(_)) => {}
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    /// Assert that an EngineResult is a Parse error.
    #[track_caller]
    pub fn assert_parse_error<T: std::fmt::Debug>(result: &EngineResult<T>) {
        match result {
            Err(EngineError::Parse(_)) => {}
            other => panic!("Expected Parse error, got: {:?}", other),
        }
    }

    /// Assert that an EngineResult is a Sequencing error.
    #[track_caller]
    pub fn assert_sequencing_error<T: std::fmt::Debug>(result: &EngineResult<T>) {
        match result {
            Err(EngineError::Sequencing(_)) => {}
            other => panic!("Expected Sequencing error, got: {:?}", other),
        }
    }

    /// Assert that every line of the table region has the same display width.
    #[track_caller]
    pub fn assert_aligned(document: &str, markers: &Markers) {
        let lines = region_lines(document, markers);
        let table: Vec<&str> = lines.iter().copied().filter(|l| !l.trim().is_empty()).collect();
        assert!(!table.is_empty(), "table region is empty");
        let width = display_width(table[0]);
        for line in &table {
            assert_eq!(display_width(line), width, "misaligned line: {:?}", line);
        }
    }

    /// Assert that text outside the markers is byte-identical in both documents.
    #[track_caller]
    pub fn assert_outside_unchanged(old: &str, new: &str, markers: &Markers) {
        let split = |text: &str| -> (String, String) {
            let start = text.find(&markers.start).expect("start marker");
            let end = text.find(&markers.end).expect("end marker");
            let head_end = text[start..].find('\n').map_or(text.len(), |i| start + i + 1);
            let tail_start = text[..end].rfind('\n').map_or(0, |i| i + 1);
            (text[..head_end].to_string(), text[tail_start..].to_string())
        };
        assert_eq!(split(old), split(new), "content outside the markers changed");
    }

    fn region_lines<'a>(document: &'a str, markers: &Markers) -> Vec<&'a str> {
        document
            .lines()
            .skip_while(|line| !line.contains(&markers.start))
            .skip(1)
            .take_while(|line| !line.contains(&markers.end))
            .collect()
    }
}
