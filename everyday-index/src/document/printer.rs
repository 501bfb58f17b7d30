//! Canonical table printer
//! Every cell is padded to its column width with one space on each side.

use super::{Alignment, LineEnding, TableRow};
use crate::width::{compute_widths, display_width, CELL_PADDING};

/// Render header, separator and rows as aligned markdown lines.
pub(super) fn render_table(
    header: &TableRow,
    alignments: &[Alignment],
    rows: &[TableRow],
    line_ending: LineEnding,
) -> String {
    let widths = compute_widths(rows, header);
    let eol = line_ending.as_str();

    let mut out = String::new();
    out.push_str(&render_row(header, alignments, &widths));
    out.push_str(eol);
    out.push_str(&render_separator(alignments, &widths));
    out.push_str(eol);
    for row in rows {
        out.push_str(&render_row(row, alignments, &widths));
        out.push_str(eol);
    }
    out
}

/// Render one row without a line terminator.
pub fn render_row(row: &TableRow, alignments: &[Alignment], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (index, width) in widths.iter().enumerate() {
        let value = row.cell(index).unwrap_or("");
        let alignment = alignments
            .get(index)
            .copied()
            .unwrap_or(Alignment::Unspecified);
        line.push_str(&render_cell(value, alignment, *width));
        line.push('|');
    }
    line
}

/// Render the separator row without a line terminator.
pub fn render_separator(alignments: &[Alignment], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (index, width) in widths.iter().enumerate() {
        let dashes = width.saturating_sub(CELL_PADDING);
        let alignment = alignments
            .get(index)
            .copied()
            .unwrap_or(Alignment::Unspecified);
        let content = match alignment {
            Alignment::Unspecified => "-".repeat(dashes),
            Alignment::Left => format!(":{}", "-".repeat(dashes.saturating_sub(1))),
            Alignment::Right => format!("{}:", "-".repeat(dashes.saturating_sub(1))),
            Alignment::Center => format!(":{}:", "-".repeat(dashes.saturating_sub(2))),
        };
        line.push(' ');
        line.push_str(&content);
        line.push(' ');
        line.push('|');
    }
    line
}

/// Pad `value` to a cell of `width` columns, padding included.
pub fn render_cell(value: &str, alignment: Alignment, width: usize) -> String {
    let fill = width
        .saturating_sub(CELL_PADDING)
        .saturating_sub(display_width(value));
    let (left, right) = match alignment {
        Alignment::Unspecified | Alignment::Left => (0, fill),
        Alignment::Right => (fill, 0),
        Alignment::Center => (fill / 2, fill - fill / 2),
    };
    format!(" {}{}{} ", " ".repeat(left), value, " ".repeat(right))
}
