/// Directory walker using `jwalk`.
///
/// `jwalk` reads directories on a rayon pool but, with sorting on, yields
/// entries in a deterministic depth-first order: every directory right
/// before its contents, siblings by name. That order lets the nested
/// `FileNode` tree be assembled with a stack of open directories, one
/// frame per depth level, without ever looking an entry's parent up by
/// path.
use super::{ScanOptions, ScanOutcome};
use crate::analysis::guess_mime_type;
use crate::model::{FileEntry, FileNode};
use chrono::{DateTime, Utc};
use compact_str::CompactString;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// A directory whose contents are still being collected.
struct OpenDir {
    name: CompactString,
    children: Vec<FileNode>,
}

/// Pop the innermost open directory and attach it to its parent.
fn close_innermost(stack: &mut Vec<OpenDir>) {
    if stack.len() < 2 {
        return;
    }
    if let Some(done) = stack.pop() {
        if let Some(parent) = stack.last_mut() {
            parent.children.push(FileNode::Directory {
                name: done.name,
                children: done.children,
            });
        }
    }
}

/// Walk `root` and build its top-level entries.
pub fn walk_folder(root: &Path, options: &ScanOptions) -> ScanOutcome {
    let mut files_found: u64 = 0;
    let mut dirs_found: u64 = 0;
    let mut error_count: u64 = 0;

    // Frame 0 is the selected folder itself; its children are the result.
    let mut stack: Vec<OpenDir> = vec![OpenDir {
        name: CompactString::default(),
        children: Vec::new(),
    }];

    let walker = jwalk::WalkDir::new(root)
        .sort(true)
        .skip_hidden(options.skip_hidden)
        .follow_links(options.follow_links)
        .parallelism(jwalk::Parallelism::RayonNewPool(num_cpus::get()));

    for entry_result in walker {
        let entry = match entry_result {
            Ok(e) => e,
            Err(err) => {
                // Typically access denied while reading a directory.
                error_count += 1;
                warn!("Skipping unreadable entry: {err}");
                continue;
            }
        };

        // The root itself is frame 0.
        if entry.depth == 0 {
            continue;
        }

        // Close every directory this entry is not inside of.
        while stack.len() > entry.depth {
            close_innermost(&mut stack);
        }
        if stack.len() < entry.depth {
            // Parent was never opened; cannot place this entry.
            error_count += 1;
            warn!("Skipping orphaned entry {}", entry.path().display());
            continue;
        }

        let name = CompactString::new(entry.file_name().to_string_lossy());

        if entry.file_type().is_dir() {
            stack.push(OpenDir {
                name,
                children: Vec::new(),
            });
            dirs_found += 1;
            continue;
        }

        let path = entry.path();
        match read_file_entry(&path, name, options) {
            Ok(file) => {
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(FileNode::File(file));
                }
                files_found += 1;
            }
            Err(err) => {
                error_count += 1;
                warn!("Skipping {}: {err}", path.display());
            }
        }
    }

    while stack.len() > 1 {
        close_innermost(&mut stack);
    }
    let entries = stack.pop().map(|root| root.children).unwrap_or_default();

    debug!(
        "Walk of {} built {} top-level entries",
        root.display(),
        entries.len()
    );

    ScanOutcome {
        entries,
        files_found,
        dirs_found,
        error_count,
        duration: Duration::ZERO,
    }
}

/// Stat one file (and read it, if asked) into a [`FileEntry`].
fn read_file_entry(
    path: &Path,
    name: CompactString,
    options: &ScanOptions,
) -> std::io::Result<FileEntry> {
    let meta = if options.follow_links {
        std::fs::metadata(path)?
    } else {
        std::fs::symlink_metadata(path)?
    };
    let last_modified = meta.modified().ok().map(DateTime::<Utc>::from);
    let mime_type = guess_mime_type(&name).map(str::to_string);

    let (contents, source) = if options.load_contents {
        (Some(std::fs::read(path)?), None)
    } else {
        (None, Some(PathBuf::from(path)))
    };

    Ok(FileEntry {
        name,
        size: meta.len(),
        last_modified,
        contents,
        mime_type,
        source,
    })
}
