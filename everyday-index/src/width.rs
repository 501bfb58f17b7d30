//! Column width calculation

use crate::document::TableRow;
use unicode_width::UnicodeWidthStr;

/// One space on each side of a cell value.
pub const CELL_PADDING: usize = 2;

/// Smallest content width, so a separator cell always holds `---`.
pub const MIN_CONTENT_WIDTH: usize = 3;

/// Terminal display width of a cell value.
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Minimum rendered width of every column, padding included.
///
/// Only the set of values matters: the result does not depend on row order.
pub fn compute_widths(rows: &[TableRow], header: &TableRow) -> Vec<usize> {
    (0..header.len())
        .map(|index| {
            let content = rows
                .iter()
                .filter_map(|row| row.cell(index))
                .chain(header.cell(index))
                .map(display_width)
                .max()
                .unwrap_or(0);
            content.max(MIN_CONTENT_WIDTH) + CELL_PADDING
        })
        .collect()
}
