//! Flat CSV rendering for reports.

/// Quote a cell when it holds a delimiter, a quote or a line break.
///
/// Embedded quotes are doubled. A bare `\r` counts as a line break.
pub fn csv_escape(value: &str) -> String {
    let needs_quotes = value
        .chars()
        .any(|c| matches!(c, ',' | '"' | '\n' | '\r'));
    if needs_quotes {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Build a CSV document from a header row and data rows.
///
/// Every cell is escaped; rows are joined with `\n` and the document ends
/// with a trailing newline.
pub fn build_csv<S: AsRef<str>>(headers: &[&str], rows: &[Vec<S>]) -> String {
    let mut out = String::new();
    let header: Vec<String> = headers.iter().map(|h| csv_escape(h)).collect();
    out.push_str(&header.join(","));
    out.push('\n');

    for row in rows {
        let cells: Vec<String> = row.iter().map(|c| csv_escape(c.as_ref())).collect();
        out.push_str(&cells.join(","));
        out.push('\n');
    }

    out
}
