/// Export sink that saves artifacts into a download directory.
///
/// Each artifact is written to a temporary file inside the target
/// directory and then persisted under its final name without clobbering.
/// A temporary file that is never persisted is deleted when dropped, so a
/// failed write leaves the directory as it was.
use super::{ExportArtifact, ExportError, ExportSink};
use compact_str::CompactString;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Upper bound on ` (n)` suffixes tried before giving up on a name.
const MAX_NAME_ATTEMPTS: u32 = 10_000;

/// Saves artifacts under their own names in `dir`.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ExportSink for DirectorySink {
    fn deliver(&mut self, artifact: &ExportArtifact) -> Result<PathBuf, ExportError> {
        let name = artifact.file_name.clone();
        let file_name = safe_file_name(&artifact.file_name)
            .ok_or_else(|| ExportError::InvalidName(name.clone()))?;
        let deliver_err = |source: io::Error| ExportError::Deliver {
            name: name.clone(),
            source,
        };

        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(deliver_err)?;
        tmp.write_all(&artifact.bytes).map_err(deliver_err)?;
        tmp.flush().map_err(deliver_err)?;

        // Another writer may claim a name between the existence check and
        // the persist, so retry with the next free suffix on collisions.
        let mut attempt = 0;
        loop {
            let target = next_free_name(&self.dir, file_name, attempt).ok_or_else(|| {
                deliver_err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    "no free file name left",
                ))
            })?;
            match tmp.persist_noclobber(&target) {
                Ok(_) => return Ok(target),
                Err(err) if err.error.kind() == io::ErrorKind::AlreadyExists => {
                    tmp = err.file;
                    attempt += 1;
                }
                Err(err) => return Err(deliver_err(err.error)),
            }
        }
    }
}

/// The final path component of `name`, rejecting empty names and
/// anything that would climb out of the download directory.
fn safe_file_name(name: &CompactString) -> Option<&str> {
    let file_name = Path::new(name.as_str()).file_name()?.to_str()?;
    if file_name.is_empty() || file_name == "." || file_name == ".." {
        return None;
    }
    Some(file_name)
}

/// First path in `dir` that does not exist yet, starting the search at
/// suffix `from`: `name.ext`, `name (1).ext`, `name (2).ext`, ...
fn next_free_name(dir: &Path, file_name: &str, from: u32) -> Option<PathBuf> {
    let (stem, ext) = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (file_name, None),
    };

    (from..MAX_NAME_ATTEMPTS)
        .map(|n| {
            if n == 0 {
                dir.join(file_name)
            } else {
                match ext {
                    Some(ext) => dir.join(format!("{stem} ({n}).{ext}")),
                    None => dir.join(format!("{stem} ({n})")),
                }
            }
        })
        .find(|candidate| !candidate.exists())
}
