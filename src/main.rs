//! FolderSight: folder reporting tool.
//!
//! Thin binary entry point. All report logic lives in the
//! `foldersight-core` crate; this binary picks the folder, renders the
//! report, and saves requested downloads.

mod cli;
mod render;

use anyhow::Context;
use clap::Parser;
use foldersight_core::export::{
    write_metadata_csv, write_report_json, DirectorySink, ExportSink,
};
use foldersight_core::model::{load_descriptor, FileNode};
use foldersight_core::scanner::scan_folder;
use foldersight_core::ReportSession;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();

    // Initialise structured logging on stderr so stdout stays clean for
    // the report and JSON output.
    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(io::stderr)
        .init();

    tracing::debug!("FolderSight starting with {args:?}");

    let entries = load_entries(&args)?;
    let mut session = ReportSession::new(entries, &args.report_options());
    session.set_view(args.view_state());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        write_report_json(session.report(), &mut out)?;
        writeln!(out)?;
    } else {
        render::write_report(&mut out, &session, args.breakdown_order())?;
    }

    if let Some(path) = &args.csv {
        let file = File::create(path)
            .with_context(|| format!("cannot create CSV file {}", path.display()))?;
        write_metadata_csv(&session.rows(), BufWriter::new(file))
            .with_context(|| format!("cannot write CSV file {}", path.display()))?;
        tracing::info!("Wrote metadata table to {}", path.display());
    }

    if let Some(dir) = &args.to {
        let mut sink = DirectorySink::new(dir);
        save_downloads(&session, &args.download, &mut sink, args.json, &mut out)?;
    }

    Ok(())
}

/// Export each named row through `sink`.
///
/// Failures are reported and skipped; they never end the run or change the
/// report. In JSON mode stdout carries only the report, so success notices
/// go to the log instead of `out`.
fn save_downloads<W: Write>(
    session: &ReportSession,
    names: &[String],
    sink: &mut dyn ExportSink,
    json: bool,
    out: &mut W,
) -> io::Result<()> {
    for name in names {
        match session.find_row(name) {
            None => eprintln!("Cannot download {name}: no such entry in the listing"),
            Some(row) => match session.export(row, sink) {
                Ok(saved) if json => {
                    tracing::info!("Saved {name} to {}", saved.display());
                }
                Ok(saved) => writeln!(out, "Saved {name} to {}", saved.display())?,
                Err(err) => eprintln!("Cannot download {name}: {err}"),
            },
        }
    }
    Ok(())
}

/// Produce the selection's top-level entries from a folder or a descriptor.
fn load_entries(args: &cli::Args) -> anyhow::Result<Vec<FileNode>> {
    if args.descriptor {
        let file = File::open(&args.path)
            .with_context(|| format!("cannot open descriptor {}", args.path.display()))?;
        let entries = load_descriptor(BufReader::new(file), args.validation_policy())
            .with_context(|| format!("invalid descriptor {}", args.path.display()))?;
        return Ok(entries);
    }

    let outcome = scan_folder(&args.path, &args.scan_options())
        .with_context(|| format!("cannot scan {}", args.path.display()))?;
    if outcome.error_count > 0 {
        tracing::warn!(
            "{} entries could not be read and are missing from the report",
            outcome.error_count
        );
    }
    Ok(outcome.entries)
}
