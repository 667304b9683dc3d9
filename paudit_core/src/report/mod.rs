//! Plain-text report rendering
//!
//! Two-row tables with per-column dynamic widths.

/// Separator between table cells
const CELL_SEPARATOR: &str = " | ";

/// Render a header line and one value line from (header, value) pairs
///
/// Each cell is left-justified to max(header length, value length),
/// measured in characters.
pub fn render_table(columns: &[(&str, &str)]) -> String {
    let widths: Vec<usize> = columns
        .iter()
        .map(|(header, value)| header.chars().count().max(value.chars().count()))
        .collect();

    let header_line = columns
        .iter()
        .zip(&widths)
        .map(|((header, _), width)| pad_cell(header, *width))
        .collect::<Vec<_>>()
        .join(CELL_SEPARATOR);

    let value_line = columns
        .iter()
        .zip(&widths)
        .map(|((_, value), width)| pad_cell(value, *width))
        .collect::<Vec<_>>()
        .join(CELL_SEPARATOR);

    format!("{}\n{}", header_line, value_line)
}

/// Split a rendered table's first non-empty line back into column headers
pub fn header_columns(table: &str) -> Vec<String> {
    table
        .lines()
        .find(|line| !line.trim().is_empty())
        .map(|line| {
            line.split(CELL_SEPARATOR)
                .map(|cell| cell.trim_end().to_string())
                .collect()
        })
        .unwrap_or_default()
}

fn pad_cell(text: &str, width: usize) -> String {
    format!("{:<width$}", text)
}
