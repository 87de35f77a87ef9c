/// Input-side description of one entry in the selected folder.
///
/// A `FileNode` is either a directory with ordered children or a file with
/// its metadata and (optionally) its payload. The two shapes are separate
/// variants, so a directory can never carry a size and a file can never
/// carry children.
use chrono::{DateTime, Utc};
use compact_str::CompactString;
use std::path::PathBuf;

/// Lightweight index into the arena `Vec<TreeNode>` of a [`FileTree`].
///
/// Uses `u32` to keep nodes small and supports up to ~4 billion entries.
///
/// [`FileTree`]: super::FileTree
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    /// Create a new `NodeIndex` from a `usize`.
    #[inline]
    pub fn new(index: usize) -> Self {
        debug_assert!(index <= u32::MAX as usize, "NodeIndex overflow");
        Self(index as u32)
    }

    /// Return the index as a `usize` for Vec indexing.
    #[inline]
    pub fn idx(self) -> usize {
        self.0 as usize
    }
}

/// One entry of the selected folder tree.
#[derive(Debug, Clone, PartialEq)]
pub enum FileNode {
    /// A folder. An empty `children` list is a valid, empty folder.
    Directory {
        name: CompactString,
        children: Vec<FileNode>,
    },
    /// A regular file.
    File(FileEntry),
}

/// The file half of [`FileNode`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FileEntry {
    /// Display name including the extension.
    pub name: CompactString,
    /// Size in bytes.
    pub size: u64,
    /// Last modification time, when the picker knows it.
    pub last_modified: Option<DateTime<Utc>>,
    /// In-memory payload. Only the export adapter reads it.
    pub contents: Option<Vec<u8>>,
    /// MIME-like type declared by the picker. Only used for export.
    pub mime_type: Option<String>,
    /// On-disk location for files whose payload was not loaded eagerly.
    pub source: Option<PathBuf>,
}

impl FileNode {
    /// Create a directory node.
    pub fn directory(name: impl Into<CompactString>, children: Vec<FileNode>) -> Self {
        Self::Directory {
            name: name.into(),
            children,
        }
    }

    /// Create a file node with a name and size; the remaining fields are empty.
    pub fn file(name: impl Into<CompactString>, size: u64) -> Self {
        Self::File(FileEntry {
            name: name.into(),
            size,
            ..FileEntry::default()
        })
    }

    /// The entry's display name.
    pub fn name(&self) -> &str {
        match self {
            Self::Directory { name, .. } => name,
            Self::File(entry) => &entry.name,
        }
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        matches!(self, Self::Directory { .. })
    }

    /// Total number of nodes in this subtree, this node included.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            if let Self::Directory { children, .. } = node {
                stack.extend(children.iter());
            }
        }
        count
    }
}

impl FileEntry {
    /// Builder-style setter for the modification time.
    pub fn modified_at(mut self, at: DateTime<Utc>) -> Self {
        self.last_modified = Some(at);
        self
    }

    /// Builder-style setter for the in-memory payload and its declared type.
    pub fn with_contents(mut self, contents: impl Into<Vec<u8>>, mime_type: &str) -> Self {
        self.contents = Some(contents.into());
        self.mime_type = Some(mime_type.to_string());
        self
    }
}

impl From<FileEntry> for FileNode {
    fn from(entry: FileEntry) -> Self {
        Self::File(entry)
    }
}
