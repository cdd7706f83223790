use crate::aggregate::ResultSet;

/// Lay the result set out as fixed-width columns.
///
/// Column width is the longer of the header text and the widest value in
/// that column; every cell is right-aligned with a single trailing space.
/// The trailing count column is unlabeled-width: it pads to nothing beyond
/// its own text.
pub fn render_table(result: &ResultSet, quiet: bool) -> String {
    let rows: Vec<Vec<String>> = result
        .records()
        .map(|record| record.cells.iter().map(|cell| cell.display()).collect())
        .collect();

    // Widths count characters, not bytes, to match the formatter's padding.
    let mut widths: Vec<usize> = result
        .fields
        .iter()
        .map(|f| f.path.chars().count())
        .collect();
    for row in &rows {
        for (width, value) in widths.iter_mut().zip(row) {
            *width = (*width).max(value.chars().count());
        }
    }

    let mut out = String::new();

    if !quiet {
        for (field, width) in result.fields.iter().zip(widths.iter().copied()) {
            out.push_str(&format!("{:>width$} ", field.path));
        }
        out.push_str("count\n");
    }

    for (row, record) in rows.iter().zip(result.records()) {
        for (value, width) in row.iter().zip(widths.iter().copied()) {
            out.push_str(&format!("{value:>width$} "));
        }
        out.push_str(&format!("{}\n", record.count));
    }

    out
}
