//! Index table engine
//!
//! `apply` is a pure transformation: old document text plus one submission
//! in, new document text plus the per-entry file descriptor out. Nothing is
//! written here; on any error the caller still holds the untouched input.

use crate::document::{TableDocument, TableRow};
use crate::identifier::next_identifier;
use crate::naming::{entry_filename, full_sequence, sequence_suffix};
use crate::schema::TableSchema;
use crate::template::{EntryTemplate, TemplateContext};
use crate::width::compute_widths;
use chrono::NaiveDate;
use everyday_core::{
    format_date, ColumnKind, EngineResult, EntryRecord, Identifier, IdentifierMode, MarkerKind,
    Markers, ParseError, RawEntry, SequencingError, TableConfig,
};

/// Result of a successful `apply`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedEntry {
    /// Full host document with the new row
    pub document: String,
    pub identifier: Identifier,
    /// Identifier plus per-day suffix, e.g. `001_01`
    pub seq_full: String,
    pub filename: String,
    /// Path of the entry file relative to the project root
    pub file_path: String,
    pub file_content: String,
    pub row: TableRow,
}

/// Summary of a parsed table, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableReport {
    pub columns: Vec<ColumnKind>,
    pub rows: usize,
    pub widths: Vec<usize>,
    pub last_identifier: Option<String>,
    /// Whether the region already matches canonical rendering
    pub aligned: bool,
}

#[derive(Debug, Clone)]
pub struct IndexTableEngine {
    config: TableConfig,
    template: EntryTemplate,
}

impl IndexTableEngine {
    /// Engine using the built-in entry template.
    pub fn new(config: TableConfig) -> Self {
        let template = EntryTemplate::builtin(config.layout());
        Self { config, template }
    }

    pub fn with_template(mut self, template: EntryTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn template(&self) -> &EntryTemplate {
        &self.template
    }

    /// Validate `raw`, append its row to the table in `document_text`, and
    /// describe the entry file to create.
    pub fn apply(
        &self,
        document_text: &str,
        markers: &Markers,
        raw: &RawEntry,
    ) -> EngineResult<AppliedEntry> {
        let record = EntryRecord::validate(raw, &self.config)?;
        let mut doc = TableDocument::parse(document_text, markers)?;
        let schema = TableSchema::resolve(doc.header(), doc.header_line(), &self.config)?;

        let identifier = next_identifier(
            doc.rows(),
            record.timestamp(),
            record.forced_identifier(),
            &self.config,
        )?;
        let seq_full = full_sequence(&identifier, sequence_suffix(doc.rows(), &identifier));
        let filename = entry_filename(&seq_full, record.title());
        let file_path = format!("{}/{}", self.config.solutions_dir(), filename);

        let row = self.build_row(&schema, &record, &identifier, &file_path);
        check_markers_absent(&row, markers)?;
        if self.config.identifier_mode() == IdentifierMode::Date
            && already_applied(doc.rows(), &row, &schema)
        {
            return Err(SequencingError::DuplicateIdentifier {
                identifier: identifier.to_string(),
            }
            .into());
        }

        doc.push_row(row.clone())?;
        let document = doc.render();

        let context = self.template_context(&record, &identifier, &seq_full, &filename, &file_path);
        let file_content = self.template.render(&context);

        tracing::info!(
            identifier = %identifier,
            filename = %filename,
            rows = doc.rows().len(),
            "Applied index entry"
        );

        Ok(AppliedEntry {
            document,
            identifier,
            seq_full,
            filename,
            file_path,
            file_content,
            row,
        })
    }

    /// Identifier the next entry dated `timestamp` would receive.
    pub fn preview_identifier(
        &self,
        document_text: &str,
        markers: &Markers,
        timestamp: NaiveDate,
        forced: Option<&str>,
    ) -> EngineResult<Identifier> {
        let doc = TableDocument::parse(document_text, markers)?;
        TableSchema::resolve(doc.header(), doc.header_line(), &self.config)?;
        Ok(next_identifier(doc.rows(), timestamp, forced, &self.config)?)
    }

    /// Parse the table and resolve its schema without changing anything.
    pub fn inspect(&self, document_text: &str, markers: &Markers) -> EngineResult<TableReport> {
        let doc = TableDocument::parse(document_text, markers)?;
        let schema = TableSchema::resolve(doc.header(), doc.header_line(), &self.config)?;
        Ok(TableReport {
            columns: schema.columns().to_vec(),
            rows: doc.rows().len(),
            widths: compute_widths(doc.rows(), doc.header()),
            last_identifier: doc.last_row().map(|row| row.identifier().to_string()),
            aligned: doc.is_aligned(),
        })
    }

    fn build_row(
        &self,
        schema: &TableSchema,
        record: &EntryRecord,
        identifier: &Identifier,
        file_path: &str,
    ) -> TableRow {
        TableRow::new(schema.columns().iter().map(|kind| match kind {
            ColumnKind::Identifier => identifier.to_string(),
            ColumnKind::Date => format_date(record.timestamp()),
            ColumnKind::Title => title_link(record),
            ColumnKind::Solution => format!("[Solution]({})", file_path),
            ColumnKind::Site => record.site().to_string(),
            ColumnKind::Difficulty => record.difficulty().unwrap_or("").to_string(),
            ColumnKind::Extra => record.notebook_ref().unwrap_or("").to_string(),
        }))
    }

    fn template_context(
        &self,
        record: &EntryRecord,
        identifier: &Identifier,
        seq_full: &str,
        filename: &str,
        file_path: &str,
    ) -> TemplateContext {
        TemplateContext::new()
            .with("proj_title", self.config.title())
            .with("seq_full", seq_full)
            .with("day", identifier.as_str())
            .with("date", format_date(record.timestamp()))
            .with("title", record.title())
            .with("title_link", title_link(record))
            .with("url", record.url().unwrap_or(""))
            .with("site", record.site())
            .with("difficulty", record.difficulty().unwrap_or(""))
            .with("problem", record.problem().unwrap_or(""))
            .with("submitted_solution", record.submitted_solution().unwrap_or(""))
            .with("site_solution", record.site_solution().unwrap_or(""))
            .with("notes", record.notes().unwrap_or(""))
            .with("nb", record.notebook_ref().unwrap_or(""))
            .with("nb_name", self.config.extra_column_name().unwrap_or(""))
            .with("filename", filename)
            .with("file_path", file_path)
    }
}

/// Apply one submission with the built-in template.
pub fn apply(
    document_text: &str,
    markers: &Markers,
    raw: &RawEntry,
    config: &TableConfig,
) -> EngineResult<AppliedEntry> {
    IndexTableEngine::new(config.clone()).apply(document_text, markers, raw)
}

fn title_link(record: &EntryRecord) -> String {
    match record.url() {
        Some(url) => format!("[{}]({})", record.title(), url),
        None => record.title().to_string(),
    }
}

/// A cell must not repeat a marker, or the output would no longer parse.
fn check_markers_absent(row: &TableRow, markers: &Markers) -> Result<(), ParseError> {
    for kind in [MarkerKind::Start, MarkerKind::End] {
        let marker = markers.get(kind);
        if row.cells().iter().any(|cell| cell.contains(marker)) {
            return Err(ParseError::MarkersMalformed {
                reason: format!("entry contains the {} marker", kind),
            });
        }
    }
    Ok(())
}

/// Same row already present, ignoring the solution link (its suffix differs).
fn already_applied(rows: &[TableRow], candidate: &TableRow, schema: &TableSchema) -> bool {
    let skip = schema.position(ColumnKind::Solution);
    rows.iter().any(|row| {
        row.cells()
            .iter()
            .zip(candidate.cells())
            .enumerate()
            .all(|(index, (a, b))| Some(index) == skip || a == b)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use everyday_core::{EngineError, ProjectSettings, ValidationError, INDEX_END, INDEX_START};

    fn document(rows: &str) -> String {
        format!(
            "# SQL Everyday\n\nIntro.\n\n{}\n| Day | Title | Solution | Site | Difficulty |\n| --- | ----- | -------- | ---- | ---------- |\n{}{}\n",
            INDEX_START, rows, INDEX_END
        )
    }

    fn entry(title: &str) -> RawEntry {
        RawEntry {
            title: Some(title.to_string()),
            url: Some("https://leetcode.com/problems/two-sum".to_string()),
            site: Some("LeetCode".to_string()),
            difficulty: Some("Easy".to_string()),
            ..RawEntry::new(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
        }
    }

    #[test]
    fn test_apply_first_row() {
        let engine = IndexTableEngine::new(TableConfig::default());
        let applied = engine
            .apply(&document(""), &Markers::default(), &entry("Two Sum"))
            .unwrap();
        assert_eq!(applied.identifier.as_str(), "001");
        assert_eq!(applied.seq_full, "001_01");
        assert_eq!(applied.filename, "001_01_two_sum.md");
        assert_eq!(applied.file_path, "solutions/001_01_two_sum.md");
        assert_eq!(
            applied.row.cells(),
            &[
                "001",
                "[Two Sum](https://leetcode.com/problems/two-sum)",
                "[Solution](solutions/001_01_two_sum.md)",
                "LeetCode",
                "Easy"
            ]
        );
        assert!(applied.document.starts_with("# SQL Everyday\n\nIntro.\n\n"));
        assert!(applied.document.contains("| 001 | [Two Sum](https://leetcode.com/problems/two-sum) |"));
        assert!(applied.file_content.starts_with("# [ ] Everyday \\#001_01\n"));
    }

    #[test]
    fn test_apply_failure_reports_validation_error() {
        let engine = IndexTableEngine::new(TableConfig::default());
        let mut raw = entry("Two Sum");
        raw.site = Some("Reddit".to_string());
        let err = engine.apply(&document(""), &Markers::default(), &raw).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Validation(ValidationError::InvalidSite { .. })
        ));
    }

    #[test]
    fn test_apply_date_mode_same_day_suffix() {
        let config = TableConfig::from_settings(&ProjectSettings {
            seq_notation: 1,
            ..ProjectSettings::default()
        })
        .unwrap();
        let engine = IndexTableEngine::new(config);
        let first = engine
            .apply(&document(""), &Markers::default(), &entry("Two Sum"))
            .unwrap();
        let second = engine
            .apply(&first.document, &Markers::default(), &entry("Add Two Numbers"))
            .unwrap();
        assert_eq!(first.identifier, second.identifier);
        assert_eq!(second.seq_full, "2025\u{2011}03\u{2011}01_02");
    }

    #[test]
    fn test_apply_date_mode_rejects_reapplied_row() {
        let config = TableConfig::from_settings(&ProjectSettings {
            seq_notation: 1,
            ..ProjectSettings::default()
        })
        .unwrap();
        let engine = IndexTableEngine::new(config);
        let first = engine
            .apply(&document(""), &Markers::default(), &entry("Two Sum"))
            .unwrap();
        let err = engine
            .apply(&first.document, &Markers::default(), &entry("Two Sum"))
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Sequencing(SequencingError::DuplicateIdentifier { .. })
        ));
    }

    #[test]
    fn test_apply_rejects_marker_in_entry() {
        let engine = IndexTableEngine::new(TableConfig::default());
        let err = engine
            .apply(&document(""), &Markers::default(), &entry(INDEX_END))
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Parse(ParseError::MarkersMalformed { .. })
        ));
    }

    #[test]
    fn test_inspect_reports_alignment() {
        let engine = IndexTableEngine::new(TableConfig::default());
        let report = engine.inspect(&document(""), &Markers::default()).unwrap();
        assert_eq!(report.rows, 0);
        assert_eq!(report.columns.len(), 5);
        assert_eq!(report.last_identifier, None);
        assert!(report.aligned);

        let ragged = document("| 001 | a | b | LeetCode | Easy |\n");
        let report = engine.inspect(&ragged, &Markers::default()).unwrap();
        assert!(!report.aligned);

        let applied = engine
            .apply(&ragged, &Markers::default(), &entry("Two Sum"))
            .unwrap();
        let report = engine.inspect(&applied.document, &Markers::default()).unwrap();
        assert!(report.aligned);
        assert_eq!(report.last_identifier.as_deref(), Some("002"));
    }

    #[test]
    fn test_preview_identifier() {
        let engine = IndexTableEngine::new(TableConfig::default());
        let id = engine
            .preview_identifier(
                &document("| 004 | a | b | LeetCode | Easy |\n"),
                &Markers::default(),
                NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                None,
            )
            .unwrap();
        assert_eq!(id.as_str(), "005");
    }
}
