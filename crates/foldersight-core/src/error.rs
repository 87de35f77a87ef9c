/// Error types for the report engine.
///
/// `ReportError` covers loading, validating and scanning the input tree.
/// Export failures have their own type, [`crate::export::ExportError`],
/// because they are reported per row and never abort a report.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while building a report.
#[derive(Error, Debug)]
pub enum ReportError {
    /// A descriptor node violated the file/directory invariant under the
    /// strict validation policy.
    #[error("malformed node at {path}: {reason}")]
    MalformedNode { path: String, reason: String },

    /// The folder handed to the scanner does not exist or is not a directory.
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Descriptor or report JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Table export errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Specialized Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
