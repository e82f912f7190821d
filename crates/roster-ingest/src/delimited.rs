//! Split-based parser for delimited uploads.
//!
//! Deliberately not an RFC 4180 reader: every comma is a field boundary and
//! quoting only strips one wrapping layer, so a delimiter inside a quoted
//! field is not supported. That limitation is part of the contract.

use roster_model::{ImportError, Result, Row, TabularDocument};
use tracing::debug;

/// Parse raw upload text into a [`TabularDocument`].
///
/// Lines that are empty after trimming are discarded anywhere in the input.
/// The first remaining line is the header line; every later line is split
/// the same way and zipped positionally against the headers (short lines
/// pad `""`, extra cells are dropped).
///
/// # Errors
/// [`ImportError::EmptyDocument`] when no non-blank lines remain.
pub fn parse_delimited(text: &str) -> Result<TabularDocument> {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());
    let Some(header_line) = lines.next() else {
        return Err(ImportError::EmptyDocument);
    };
    let headers = split_line(header_line);
    let rows: Vec<Row> = lines
        .map(|line| Row::from_cells(&headers, &split_line(line)))
        .collect();
    debug!(
        headers = headers.len(),
        rows = rows.len(),
        "parsed delimited upload"
    );
    Ok(TabularDocument { headers, rows })
}

fn split_line(line: &str) -> Vec<String> {
    line.split(',').map(normalize_cell).collect()
}

fn normalize_cell(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    strip_wrapping_quotes(trimmed).to_string()
}

/// Strip exactly one layer of wrapping double quotes: `"x"` becomes `x`,
/// `""x""` becomes `"x"`, a lone `"` is kept as is.
fn strip_wrapping_quotes(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}
