//! CSV export of a quote collection
//!
//! One header row, then one row per record in collection order. Fields are
//! quoted per RFC 4180 when they hold a comma, a quote or a line break, so
//! the comma-joined tag list always lands in a single quoted cell.

use crate::output::OutputResult;
use crate::record::QuoteRecord;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const COLUMNS: [&str; 8] = [
    "text",
    "author_name",
    "author_detail_link",
    "tags",
    "author_about",
    "author_birth_date",
    "author_birth_place",
    "author_birth_century",
];

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

fn escape_field(field: &str) -> String {
    if needs_quotes(field) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// The header line, without a line terminator
pub fn csv_header() -> String {
    COLUMNS.join(",")
}

/// Formats one record as a CSV line, without a line terminator
pub fn format_csv_row(record: &QuoteRecord) -> String {
    let birth_date = record.author_birth_date.format("%Y-%m-%d").to_string();
    let tags = record.tags.join(",");

    [
        record.text.as_str(),
        record.author_name.as_str(),
        record.author_detail_link.as_str(),
        tags.as_str(),
        record.author_about.as_str(),
        birth_date.as_str(),
        record.author_birth_place.as_str(),
        record.author_birth_century.as_str(),
    ]
    .iter()
    .map(|field| escape_field(field))
    .collect::<Vec<_>>()
    .join(",")
}

/// Writes the header and every record to any writer, CRLF-terminated
pub fn write_csv_to<W: Write>(mut w: W, records: &[QuoteRecord]) -> OutputResult<()> {
    write!(w, "{}\r\n", csv_header())?;
    for record in records {
        write!(w, "{}\r\n", format_csv_row(record))?;
    }
    w.flush()?;
    Ok(())
}

/// Writes the collection to a CSV file, replacing any existing file
///
/// # Arguments
///
/// * `path` - Destination file
/// * `records` - The collection in discovery order
///
/// # Returns
///
/// * `Ok(())` - File written
/// * `Err(OutputError)` - The file could not be created or written
pub fn write_csv(path: &Path, records: &[QuoteRecord]) -> OutputResult<()> {
    let file = File::create(path)?;
    write_csv_to(BufWriter::new(file), records)?;
    tracing::debug!("Wrote {} CSV rows to {}", records.len(), path.display());
    Ok(())
}
