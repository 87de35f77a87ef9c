/// Whole-table exports: the current metadata view as CSV and the report
/// as JSON.
use crate::analysis::{FileMetadata, Report};
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

const CSV_HEADER: [&str; 5] = ["name", "path", "size", "last_modified", "kind"];

#[derive(Serialize)]
struct CsvRow<'a> {
    name: &'a str,
    path: &'a str,
    size: Option<u64>,
    last_modified: Option<String>,
    kind: &'static str,
}

/// Write rows as CSV with a header line. Directory rows leave `size` and
/// `last_modified` empty; timestamps are RFC 3339 in UTC.
///
/// The header is written even when `rows` is empty.
pub fn write_metadata_csv<W: Write>(rows: &[FileMetadata], writer: W) -> Result<()> {
    let mut table = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    table.write_record(CSV_HEADER)?;
    for row in rows {
        table.serialize(CsvRow {
            name: &row.name,
            path: &row.path,
            size: row.size,
            last_modified: row.last_modified.map(|at| at.to_rfc3339()),
            kind: if row.is_dir { "folder" } else { "file" },
        })?;
    }
    table.flush()?;
    Ok(())
}

/// Write the report as pretty-printed JSON using the wire field names.
pub fn write_report_json<W: Write>(report: &Report, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, report)?;
    Ok(())
}
