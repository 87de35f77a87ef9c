//! Terminal layout of a report session.

use foldersight_core::analysis::{BreakdownOrder, FileMetadata};
use foldersight_core::model::size::{format_count, format_optional_size, format_size, format_timestamp};
use foldersight_core::view::SortAttribute;
use foldersight_core::ReportSession;
use std::io::{self, Write};

/// Width of the percentage bar in characters.
const BAR_WIDTH: usize = 20;

/// Longest name shown before truncation.
const MAX_NAME_WIDTH: usize = 48;

/// A bar of `width` cells with `percentage` of them filled.
pub fn percentage_bar(percentage: f64, width: usize) -> String {
    let filled = ((percentage / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn truncate(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        return name.to_string();
    }
    let kept: String = name.chars().take(width.saturating_sub(1)).collect();
    format!("{kept}…")
}

/// Table label for a row: the path, with a trailing `/` on folders, kept
/// within [`MAX_NAME_WIDTH`] cells including the slash.
fn row_label(row: &FileMetadata) -> String {
    if row.is_dir {
        let mut label = truncate(&row.path, MAX_NAME_WIDTH - 1);
        label.push('/');
        label
    } else {
        truncate(&row.path, MAX_NAME_WIDTH)
    }
}

fn header(attribute: SortAttribute, session: &ReportSession) -> String {
    let view = session.view();
    if view.sort_attribute == attribute {
        format!("{} {}", attribute.label(), view.sort_order.arrow())
    } else {
        attribute.label().to_string()
    }
}

/// Write the full text report: totals, type breakdown, metadata table.
pub fn write_report<W: Write>(
    out: &mut W,
    session: &ReportSession,
    order: BreakdownOrder,
) -> io::Result<()> {
    let report = session.report();

    writeln!(out, "Report")?;
    writeln!(
        out,
        "Total files: {}   Total folders: {}   Total size: {}",
        format_count(report.total_files),
        format_count(report.total_folders),
        format_size(report.total_size)
    )?;
    writeln!(out)?;

    writeln!(out, "File Counts by Type:")?;
    let breakdown = session.type_breakdown(order);
    if breakdown.is_empty() {
        writeln!(out, "  (no files)")?;
    }
    let ext_width = breakdown
        .iter()
        .map(|r| r.extension.chars().count())
        .max()
        .unwrap_or(0)
        .min(MAX_NAME_WIDTH);
    for row in &breakdown {
        writeln!(
            out,
            "  {:<ext_width$}  {}  Count: {}  Percentage: {:.2}%",
            truncate(&row.extension, MAX_NAME_WIDTH),
            percentage_bar(row.percentage, BAR_WIDTH),
            format_count(row.count),
            row.percentage
        )?;
    }
    writeln!(out)?;

    let rows = session.rows();
    let search = &session.view().search_query;
    if search.is_empty() {
        writeln!(out, "File Metadata:")?;
    } else {
        writeln!(out, "File Metadata (search: {search:?}):")?;
    }
    write_table(out, session, &rows)
}

fn write_table<W: Write>(
    out: &mut W,
    session: &ReportSession,
    rows: &[FileMetadata],
) -> io::Result<()> {
    let name_header = header(SortAttribute::Name, session);
    let name_width = rows
        .iter()
        .map(|r| row_label(r).chars().count())
        .chain(std::iter::once(name_header.chars().count()))
        .max()
        .unwrap_or(0)
        .min(MAX_NAME_WIDTH);

    writeln!(
        out,
        "  {:<name_width$}  {:>10}  {}",
        name_header,
        header(SortAttribute::Size, session),
        header(SortAttribute::LastModified, session)
    )?;

    if rows.is_empty() {
        writeln!(out, "  (no entries)")?;
        return Ok(());
    }

    for row in rows {
        writeln!(
            out,
            "  {:<name_width$}  {:>10}  {}",
            row_label(row),
            format_optional_size(row.size),
            format_timestamp(row.last_modified)
        )?;
    }
    Ok(())
}
