/// The aggregation engine: one pass over the arena producing a [`Report`].
///
/// Because the arena is stored in pre-order, a plain forward iteration
/// visits entries depth-first, first-to-last, with no recursion.
use super::file_types::{extension_of, type_breakdown, BreakdownOrder, TypeCount, TypeShare};
use crate::model::{FileTree, NodeIndex, NodeKind};
use chrono::{DateTime, Utc};
use compact_str::CompactString;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::time::Instant;
use tracing::debug;

/// Which entries become rows of [`Report::file_metadata`].
///
/// Counts always cover the whole tree; only the row list depends on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetadataScope {
    /// One row per top-level entry, directories included. Nested files
    /// only show up in the counts.
    #[default]
    TopLevel,
    /// One row per file at any depth, in traversal order. No directory rows.
    AllFiles,
}

/// Options for [`generate_report`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    pub metadata_scope: MetadataScope,
}

/// One row of the metadata table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    /// Arena index of the entry, used to resolve contents for export.
    #[serde(skip)]
    pub index: NodeIndex,
    pub name: CompactString,
    /// `/`-separated path relative to the selected folder.
    pub path: String,
    /// Byte count; `None` for directory rows.
    pub size: Option<u64>,
    /// Modification time; `None` for directory rows and unknown times.
    #[serde(rename = "lastModifiedDate")]
    pub last_modified: Option<DateTime<Utc>>,
    pub is_dir: bool,
}

/// Aggregated counts and metadata for one selected folder.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub total_files: u64,
    pub total_folders: u64,
    /// Sum of all file sizes in bytes.
    pub total_size: u64,
    /// Per-extension counts in first-seen order.
    #[serde(serialize_with = "counts_as_map")]
    pub file_counts_by_type: Vec<TypeCount>,
    pub file_metadata: Vec<FileMetadata>,
}

impl Report {
    /// Count for one extension (case-sensitive), 0 when never seen.
    pub fn count_for(&self, extension: &str) -> u64 {
        self.file_counts_by_type
            .iter()
            .find(|c| c.extension == extension)
            .map_or(0, |c| c.count)
    }

    /// `true` when the selection contained no entries at all.
    pub fn is_empty(&self) -> bool {
        self.total_files == 0 && self.total_folders == 0
    }

    /// Breakdown rows with percentages; empty for a report without files.
    pub fn type_breakdown(&self, order: BreakdownOrder) -> Vec<TypeShare> {
        type_breakdown(&self.file_counts_by_type, order)
    }
}

/// Serialise the counts as a JSON object `{ "txt": 2, ... }` keeping
/// first-seen key order.
fn counts_as_map<S: Serializer>(counts: &[TypeCount], serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(counts.len()))?;
    for c in counts {
        map.serialize_entry(c.extension.as_str(), &c.count)?;
    }
    map.end()
}

/// Build the metadata row for one arena entry.
pub fn metadata_for(tree: &FileTree, index: NodeIndex) -> FileMetadata {
    let node = tree.node(index);
    let (size, last_modified) = match &node.kind {
        NodeKind::File(entry) => (Some(entry.size), entry.last_modified),
        NodeKind::Directory => (None, None),
    };
    FileMetadata {
        index,
        name: node.name.clone(),
        path: tree.full_path(index),
        size,
        last_modified,
        is_dir: node.is_dir(),
    }
}

/// Aggregate the whole tree into a [`Report`].
///
/// Every directory adds one to `total_folders`; every file adds one to
/// `total_files` and to the count of its extension. Pure: the same tree
/// always yields the same report.
pub fn generate_report(tree: &FileTree, options: &ReportOptions) -> Report {
    let start = Instant::now();
    let mut report = Report::default();

    // Extension → position in `file_counts_by_type`.
    let mut positions: HashMap<CompactString, usize> = HashMap::new();

    for node in &tree.nodes {
        match &node.kind {
            NodeKind::Directory => report.total_folders += 1,
            NodeKind::File(entry) => {
                report.total_files += 1;
                // Descriptor sizes are unchecked u64s; clamp instead of wrapping.
                report.total_size = report.total_size.saturating_add(entry.size);

                let ext = extension_of(&entry.name);
                match positions.get(ext) {
                    Some(&pos) => report.file_counts_by_type[pos].count += 1,
                    None => {
                        positions.insert(CompactString::new(ext), report.file_counts_by_type.len());
                        report.file_counts_by_type.push(TypeCount {
                            extension: CompactString::new(ext),
                            count: 1,
                        });
                    }
                }
            }
        }
    }

    report.file_metadata = match options.metadata_scope {
        MetadataScope::TopLevel => tree
            .roots
            .iter()
            .map(|&idx| metadata_for(tree, idx))
            .collect(),
        MetadataScope::AllFiles => tree
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| !node.is_dir())
            .map(|(i, _)| metadata_for(tree, NodeIndex::new(i)))
            .collect(),
    };

    debug!(
        "Report over {} nodes: {} files, {} folders, {} types in {:?}",
        tree.len(),
        report.total_files,
        report.total_folders,
        report.file_counts_by_type.len(),
        start.elapsed()
    );

    report
}
