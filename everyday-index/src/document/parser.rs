//! Locates the marker-bounded region and parses the table inside it

use super::{Alignment, LineEnding, TableDocument, TableRow};
use everyday_core::{MarkerKind, Markers, ParseError};

enum Phase {
    Lead,
    Table,
    Trail,
}

pub(super) fn parse_document(text: &str, markers: &Markers) -> Result<TableDocument, ParseError> {
    let lines: Vec<&str> = text.split_inclusive('\n').collect();

    let start = locate_marker(text, &lines, markers, MarkerKind::Start)?;
    let end = locate_marker(text, &lines, markers, MarkerKind::End)?;
    if start == end {
        return Err(ParseError::MarkersMalformed {
            reason: format!("start and end markers share line {}", start + 1),
        });
    }
    if end < start {
        return Err(ParseError::MarkersMalformed {
            reason: format!(
                "end marker on line {} precedes start marker on line {}",
                end + 1,
                start + 1
            ),
        });
    }

    let before: String = lines[..=start].concat();
    let after: String = lines[end..].concat();

    let mut lead = String::new();
    let mut trail = String::new();
    let mut table_lines: Vec<(usize, &str)> = Vec::new();
    let mut phase = Phase::Lead;

    for (offset, line) in lines[start + 1..end].iter().enumerate() {
        let line_no = start + 2 + offset;
        let blank = line.trim().is_empty();
        match (&phase, blank) {
            (Phase::Lead | Phase::Table, false) => {
                if !line.trim_start().starts_with('|') {
                    return Err(ParseError::MalformedTable {
                        line: line_no,
                        reason: "expected a table row".to_string(),
                    });
                }
                phase = Phase::Table;
                table_lines.push((line_no, line));
            }
            (Phase::Lead, true) => lead.push_str(line),
            (Phase::Table | Phase::Trail, true) => {
                phase = Phase::Trail;
                trail.push_str(line);
            }
            (Phase::Trail, false) => {
                return Err(ParseError::MalformedTable {
                    line: line_no,
                    reason: "table rows must be contiguous".to_string(),
                });
            }
        }
    }

    let Some(&(header_line, header_text)) = table_lines.first() else {
        return Err(ParseError::MalformedTable {
            line: start + 2,
            reason: "missing header row".to_string(),
        });
    };
    let header = TableRow::new(split_cells(header_text));

    let Some(&(separator_line, separator_text)) = table_lines.get(1) else {
        return Err(ParseError::MalformedTable {
            line: header_line + 1,
            reason: "missing separator row".to_string(),
        });
    };
    let separator_cells = split_cells(separator_text);
    if separator_cells.len() != header.len() {
        return Err(ParseError::ColumnCountMismatch {
            line: separator_line,
            expected: header.len(),
            found: separator_cells.len(),
        });
    }
    let alignments = separator_cells
        .iter()
        .map(|cell| {
            parse_alignment(cell).ok_or_else(|| ParseError::MalformedTable {
                line: separator_line,
                reason: format!("invalid separator cell '{}'", cell),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut rows = Vec::with_capacity(table_lines.len().saturating_sub(2));
    for &(line_no, line) in &table_lines[2..] {
        let row = TableRow::new(split_cells(line));
        if row.len() != header.len() {
            return Err(ParseError::ColumnCountMismatch {
                line: line_no,
                expected: header.len(),
                found: row.len(),
            });
        }
        rows.push(row);
    }

    // Any CRLF line in the table makes CRLF the rendering line ending.
    let line_ending = if table_lines.iter().any(|&(_, line)| line.ends_with("\r\n")) {
        LineEnding::CrLf
    } else {
        LineEnding::Lf
    };
    let source: String = table_lines.iter().map(|&(_, line)| line).collect();

    tracing::debug!(
        header_line,
        columns = header.len(),
        rows = rows.len(),
        "Parsed index table"
    );

    Ok(TableDocument {
        before,
        lead,
        header,
        alignments,
        rows,
        trail,
        after,
        line_ending,
        header_line,
        source: Some(source),
    })
}

/// Zero-based line index of the marker; it must occur exactly once.
fn locate_marker(
    text: &str,
    lines: &[&str],
    markers: &Markers,
    kind: MarkerKind,
) -> Result<usize, ParseError> {
    let marker = markers.get(kind);
    if marker.is_empty() {
        return Err(ParseError::MarkersMalformed {
            reason: format!("{} marker is empty", kind),
        });
    }
    match text.matches(marker).count() {
        0 => Err(ParseError::MarkersNotFound { marker: kind }),
        1 => lines
            .iter()
            .position(|line| line.contains(marker))
            .ok_or_else(|| ParseError::MarkersMalformed {
                reason: format!("{} marker spans several lines", kind),
            }),
        n => Err(ParseError::MarkersMalformed {
            reason: format!("{} marker appears {} times", kind, n),
        }),
    }
}

/// Split a pipe-delimited table line into trimmed cell values.
pub fn split_cells(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(|cell| cell.trim().to_string()).collect()
}

fn parse_alignment(cell: &str) -> Option<Alignment> {
    let cell = cell.trim();
    let (left, rest) = match cell.strip_prefix(':') {
        Some(rest) => (true, rest),
        None => (false, cell),
    };
    let (right, dashes) = match rest.strip_suffix(':') {
        Some(dashes) => (true, dashes),
        None => (false, rest),
    };
    if dashes.is_empty() || !dashes.bytes().all(|b| b == b'-') {
        return None;
    }
    Some(match (left, right) {
        (false, false) => Alignment::Unspecified,
        (true, false) => Alignment::Left,
        (false, true) => Alignment::Right,
        (true, true) => Alignment::Center,
    })
}
