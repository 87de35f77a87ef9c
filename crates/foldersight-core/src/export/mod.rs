/// Export adapter: turns one metadata row back into a downloadable file.
///
/// Preparation ([`prepare_artifact`]) resolves the row's bytes and type;
/// delivery is behind the [`ExportSink`] seam so each frontend decides
/// where the file goes. Failures are returned per row and never affect the
/// report or the view.
pub mod directory;
pub mod table;

pub use directory::DirectorySink;
pub use table::{write_metadata_csv, write_report_json};

use crate::analysis::{guess_mime_type, FileMetadata};
use crate::model::{FileTree, NodeIndex, NodeKind};
use compact_str::CompactString;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};

/// MIME type used when neither the picker nor the extension names one.
pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Why a row could not be exported.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("row does not belong to this report")]
    UnknownEntry,

    #[error("{0} is a folder and cannot be downloaded")]
    Directory(CompactString),

    #[error("contents of {0} are not available")]
    ContentsUnavailable(CompactString),

    #[error("{0} is not a usable file name")]
    InvalidName(CompactString),

    #[error("failed to read {name}: {source}")]
    Read {
        name: CompactString,
        #[source]
        source: io::Error,
    },

    #[error("failed to deliver {name}: {source}")]
    Deliver {
        name: CompactString,
        #[source]
        source: io::Error,
    },
}

/// A named, typed blob ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: CompactString,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Where exported artifacts end up.
///
/// Implementations must not leave temporary resources behind, whether the
/// delivery succeeds or fails.
pub trait ExportSink {
    /// Deliver the artifact and return the location it was written to.
    fn deliver(&mut self, artifact: &ExportArtifact) -> Result<PathBuf, ExportError>;
}

/// Resolve the bytes and type of the file at `index`.
///
/// In-memory contents win; otherwise the file is read from its recorded
/// source path. The declared type wins; otherwise it is guessed from the
/// extension.
pub fn prepare_artifact(tree: &FileTree, index: NodeIndex) -> Result<ExportArtifact, ExportError> {
    let node = tree.get(index).ok_or(ExportError::UnknownEntry)?;
    let entry = match &node.kind {
        NodeKind::File(entry) => entry,
        NodeKind::Directory => return Err(ExportError::Directory(node.name.clone())),
    };

    let bytes = match (&entry.contents, &entry.source) {
        (Some(contents), _) => contents.clone(),
        (None, Some(source)) => std::fs::read(source).map_err(|source| ExportError::Read {
            name: entry.name.clone(),
            source,
        })?,
        (None, None) => return Err(ExportError::ContentsUnavailable(entry.name.clone())),
    };

    let mime_type = entry
        .mime_type
        .clone()
        .filter(|t| !t.is_empty())
        .or_else(|| guess_mime_type(&entry.name).map(str::to_string))
        .unwrap_or_else(|| FALLBACK_MIME_TYPE.to_string());

    Ok(ExportArtifact {
        file_name: entry.name.clone(),
        mime_type,
        bytes,
    })
}

/// Export one metadata row through `sink`.
///
/// The row must come from a report built over `tree`; a row whose index
/// points at a different entry is rejected rather than exporting the wrong
/// file.
pub fn export_row(
    tree: &FileTree,
    row: &FileMetadata,
    sink: &mut dyn ExportSink,
) -> Result<PathBuf, ExportError> {
    let matches_tree = tree
        .get(row.index)
        .is_some_and(|node| node.name == row.name);
    if !matches_tree {
        warn!(name = %row.name, "export requested for a row from another report");
        return Err(ExportError::UnknownEntry);
    }

    let result = prepare_artifact(tree, row.index).and_then(|artifact| sink.deliver(&artifact));
    match &result {
        Ok(path) => debug!("Exported {} to {}", row.path, path.display()),
        Err(err) => warn!("Export of {} failed: {err}", row.path),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::metadata_for;
    use crate::model::{FileEntry, FileNode};

    /// Collects artifacts in memory.
    #[derive(Default)]
    struct MemorySink {
        delivered: Vec<ExportArtifact>,
    }

    impl ExportSink for MemorySink {
        fn deliver(&mut self, artifact: &ExportArtifact) -> Result<PathBuf, ExportError> {
            self.delivered.push(artifact.clone());
            Ok(PathBuf::from(artifact.file_name.as_str()))
        }
    }

    fn tree() -> FileTree {
        FileTree::from_entries(vec![
            FileEntry {
                name: "note.txt".into(),
                size: 5,
                ..FileEntry::default()
            }
            .with_contents("hello", "text/plain")
            .into(),
            FileEntry {
                name: "data.json".into(),
                size: 2,
                contents: Some(b"{}".to_vec()),
                ..FileEntry::default()
            }
            .into(),
            FileNode::file("blob.xyz", 0),
            FileNode::directory("folder", Vec::new()),
        ])
    }

    #[test]
    fn declared_type_and_contents_are_used() {
        let artifact = prepare_artifact(&tree(), NodeIndex::new(0)).unwrap();
        assert_eq!(artifact.file_name, "note.txt");
        assert_eq!(artifact.mime_type, "text/plain");
        assert_eq!(artifact.bytes, b"hello");
    }

    #[test]
    fn missing_type_is_guessed_from_extension() {
        let artifact = prepare_artifact(&tree(), NodeIndex::new(1)).unwrap();
        assert_eq!(artifact.mime_type, "application/json");
    }

    #[test]
    fn file_without_contents_or_source_fails() {
        let err = prepare_artifact(&tree(), NodeIndex::new(2)).unwrap_err();
        assert!(matches!(err, ExportError::ContentsUnavailable(name) if name == "blob.xyz"));
    }

    #[test]
    fn directories_cannot_be_exported() {
        let err = prepare_artifact(&tree(), NodeIndex::new(3)).unwrap_err();
        assert!(matches!(err, ExportError::Directory(_)));
    }

    #[test]
    fn out_of_range_index_is_unknown() {
        let err = prepare_artifact(&tree(), NodeIndex::new(99)).unwrap_err();
        assert!(matches!(err, ExportError::UnknownEntry));
    }

    #[test]
    fn contents_are_read_from_source_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("on_disk.md");
        std::fs::write(&path, "# title").unwrap();

        let tree = FileTree::from_entries(vec![FileEntry {
            name: "on_disk.md".into(),
            size: 7,
            source: Some(path),
            ..FileEntry::default()
        }
        .into()]);
        let artifact = prepare_artifact(&tree, NodeIndex::new(0)).unwrap();
        assert_eq!(artifact.bytes, b"# title");
        assert_eq!(artifact.mime_type, "text/markdown");
    }

    #[test]
    fn vanished_source_is_a_read_error() {
        let tree = FileTree::from_entries(vec![FileEntry {
            name: "gone.txt".into(),
            source: Some(PathBuf::from("/definitely/not/here/gone.txt")),
            ..FileEntry::default()
        }
        .into()]);
        let err = prepare_artifact(&tree, NodeIndex::new(0)).unwrap_err();
        assert!(matches!(err, ExportError::Read { .. }));
    }

    #[test]
    fn export_row_delivers_through_sink() {
        let tree = tree();
        let row = metadata_for(&tree, NodeIndex::new(0));
        let mut sink = MemorySink::default();
        let path = export_row(&tree, &row, &mut sink).unwrap();
        assert_eq!(path, PathBuf::from("note.txt"));
        assert_eq!(sink.delivered.len(), 1);
    }

    #[test]
    fn export_row_failure_delivers_nothing() {
        let tree = tree();
        let row = metadata_for(&tree, NodeIndex::new(3));
        let mut sink = MemorySink::default();
        assert!(export_row(&tree, &row, &mut sink).is_err());
        assert!(sink.delivered.is_empty());
    }

    #[test]
    fn export_row_rejects_rows_from_another_tree() {
        let tree = tree();
        let mut row = metadata_for(&tree, NodeIndex::new(0));
        row.name = "impostor.txt".into();
        let mut sink = MemorySink::default();
        assert!(matches!(
            export_row(&tree, &row, &mut sink),
            Err(ExportError::UnknownEntry)
        ));
    }
}
