//! Host document model: the managed table region between the sentinel markers
//!
//! Everything outside the region is kept as opaque text. Inside, the table is
//! held as typed rows. An untouched table renders back to its original bytes;
//! the first mutation switches it to canonical, re-aligned output.

mod parser;
mod printer;

pub use parser::split_cells;
pub use printer::{render_cell, render_row, render_separator};

use everyday_core::{Markers, ParseError};

/// Column alignment, as declared by the separator row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alignment {
    /// `---`
    Unspecified,
    /// `:--`
    Left,
    /// `--:`
    Right,
    /// `:-:`
    Center,
}

/// Line terminator used when the region is re-rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineEnding {
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// One table line as an ordered list of cell values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableRow {
    cells: Vec<String>,
}

impl TableRow {
    pub fn new<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }

    /// The leading cell.
    pub fn identifier(&self) -> &str {
        self.cells.first().map(String::as_str).unwrap_or("")
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Parsed host document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDocument {
    /// Text up to and including the start marker line
    before: String,
    /// Blank lines between the start marker and the header
    lead: String,
    header: TableRow,
    alignments: Vec<Alignment>,
    rows: Vec<TableRow>,
    /// Blank lines between the last row and the end marker
    trail: String,
    /// Text from the end marker line to the end of the document
    after: String,
    line_ending: LineEnding,
    /// 1-based line number of the header row
    header_line: usize,
    /// Original table text while the table is unmodified
    source: Option<String>,
}

impl TableDocument {
    /// Locate and parse the table region of `text`.
    pub fn parse(text: &str, markers: &Markers) -> Result<Self, ParseError> {
        parser::parse_document(text, markers)
    }

    /// Render the full document.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(
            self.before.len() + self.after.len() + self.source.as_ref().map_or(0, String::len),
        );
        out.push_str(&self.before);
        out.push_str(&self.lead);
        match &self.source {
            Some(source) => out.push_str(source),
            None => out.push_str(&self.render_table()),
        }
        out.push_str(&self.trail);
        out.push_str(&self.after);
        out
    }

    /// Render the table region canonically, regardless of modification state.
    pub fn render_table(&self) -> String {
        printer::render_table(&self.header, &self.alignments, &self.rows, self.line_ending)
    }

    /// Whether the current region text already matches canonical output.
    pub fn is_aligned(&self) -> bool {
        match &self.source {
            Some(source) => *source == self.render_table(),
            None => true,
        }
    }

    /// Append a row. The row must have the same cell count as the header.
    pub fn push_row(&mut self, row: TableRow) -> Result<(), ParseError> {
        if row.len() != self.header.len() {
            return Err(ParseError::ColumnCountMismatch {
                line: self.header_line + 2 + self.rows.len(),
                expected: self.header.len(),
                found: row.len(),
            });
        }
        tracing::debug!(identifier = row.identifier(), "Appending index row");
        self.rows.push(row);
        self.source = None;
        Ok(())
    }

    pub fn header(&self) -> &TableRow {
        &self.header
    }

    pub fn alignments(&self) -> &[Alignment] {
        &self.alignments
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn last_row(&self) -> Option<&TableRow> {
        self.rows.last()
    }

    pub fn header_line(&self) -> usize {
        self.header_line
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    pub fn is_modified(&self) -> bool {
        self.source.is_none()
    }
}

/// Parse `text` into a table document. See [`TableDocument::parse`].
pub fn parse(text: &str, markers: &Markers) -> Result<TableDocument, ParseError> {
    TableDocument::parse(text, markers)
}

/// Render a table document. See [`TableDocument::render`].
pub fn render(table: &TableDocument) -> String {
    table.render()
}
