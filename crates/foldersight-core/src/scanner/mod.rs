/// Scanner module: the folder-picker side of the report.
///
/// Walks a real directory and hands back the ordered top-level
/// [`FileNode`]s of the selected folder, exactly the shape the aggregation
/// engine consumes. The engine itself never touches the file system.
pub mod walk;

use crate::error::{ReportError, Result};
use crate::model::FileNode;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::info;

/// Options for [`scan_folder`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    /// Leave out dot-files and dot-folders.
    pub skip_hidden: bool,
    /// Descend into symlinked directories.
    pub follow_links: bool,
    /// Read every file's payload into memory during the scan. When off,
    /// files record their path and are read only when exported.
    pub load_contents: bool,
}

/// Result of one scan.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// Top-level entries of the selected folder, sorted by name at every level.
    pub entries: Vec<FileNode>,
    pub files_found: u64,
    pub dirs_found: u64,
    /// Entries that could not be read and were left out.
    pub error_count: u64,
    pub duration: Duration,
}

/// Scan `root` into a tree of [`FileNode`]s.
///
/// Unreadable entries are skipped and counted; only a missing or
/// non-directory `root` is an error.
pub fn scan_folder(root: &Path, options: &ScanOptions) -> Result<ScanOutcome> {
    if !root.is_dir() {
        return Err(ReportError::NotADirectory(root.to_path_buf()));
    }

    info!("Starting scan of {}", root.display());
    let start = Instant::now();
    let mut outcome = walk::walk_folder(root, options);
    outcome.duration = start.elapsed();

    info!(
        "Scan complete: {} files, {} folders, {} errors in {:?}",
        outcome.files_found, outcome.dirs_found, outcome.error_count, outcome.duration
    );
    Ok(outcome)
}
