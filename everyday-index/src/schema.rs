//! Maps the header row of a parsed table onto recognized column kinds

use crate::document::TableRow;
use everyday_core::{ColumnKind, ParseError, TableConfig};

/// Column kinds of a table, in header order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    columns: Vec<ColumnKind>,
}

impl TableSchema {
    /// Resolve `header` against the configured layout.
    ///
    /// The first column is always the identifier, whatever its label. The
    /// remaining labels must each map to a distinct kind, and the extra
    /// column must be present exactly when the layout enables it.
    pub fn resolve(
        header: &TableRow,
        header_line: usize,
        config: &TableConfig,
    ) -> Result<Self, ParseError> {
        let expected = config.column_count();
        if header.len() != expected {
            return Err(ParseError::ColumnCountMismatch {
                line: header_line,
                expected,
                found: header.len(),
            });
        }

        let extra_name = config.extra_column_name();
        let mut columns = Vec::with_capacity(header.len());
        columns.push(ColumnKind::Identifier);
        for label in &header.cells()[1..] {
            let kind = ColumnKind::from_label(label, extra_name).ok_or_else(|| {
                ParseError::UnrecognizedColumn {
                    label: label.clone(),
                }
            })?;
            if columns.contains(&kind) {
                return Err(ParseError::DuplicateColumn { kind });
            }
            columns.push(kind);
        }

        if config.extra_column_enabled() && !columns.contains(&ColumnKind::Extra) {
            return Err(ParseError::MissingColumn {
                kind: ColumnKind::Extra,
            });
        }

        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[ColumnKind] {
        &self.columns
    }

    pub fn position(&self, kind: ColumnKind) -> Option<usize> {
        self.columns.iter().position(|k| *k == kind)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
