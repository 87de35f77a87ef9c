/// Loader for the picker's JSON descriptor format.
///
/// The wire shape is the loosely-typed object the folder picker hands over:
///
/// ```json
/// [
///   { "name": "a.txt", "size": 10, "lastModifiedDate": "2024-01-02T03:04:05Z",
///     "contents": "hello", "type": "text/plain" },
///   { "name": "src", "isDirectory": true, "children": [ ... ] }
/// ]
/// ```
///
/// A bare array and an object wrapping it as `{ "files": [...] }` are both
/// accepted. `lastModifiedDate` (alias `lastModified`) is either an RFC 3339
/// string or epoch milliseconds; `contents` is either a string or a byte
/// array. Every node is normalised into a [`FileNode`] under a
/// [`ValidationPolicy`].
use super::file_node::{FileEntry, FileNode};
use crate::error::{ReportError, Result};
use chrono::{DateTime, Utc};
use compact_str::CompactString;
use serde::Deserialize;
use std::io::Read;
use tracing::warn;

/// How nodes that break the file/directory invariant are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationPolicy {
    /// Fill in defaults (no children → empty folder, no size → 0) and drop
    /// fields that do not belong to the node's kind. Each default is logged.
    #[default]
    Lenient,
    /// Reject the first malformed node with [`ReportError::MalformedNode`].
    Strict,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDescriptor {
    List(Vec<RawNode>),
    Wrapped { files: Vec<RawNode> },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNode {
    name: CompactString,
    #[serde(default)]
    is_directory: bool,
    children: Option<Vec<RawNode>>,
    size: Option<u64>,
    #[serde(alias = "lastModified")]
    last_modified_date: Option<RawTimestamp>,
    contents: Option<RawContents>,
    #[serde(rename = "type")]
    mime_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Millis(i64),
    Text(DateTime<Utc>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawContents {
    Text(String),
    Bytes(Vec<u8>),
}

/// Parse a descriptor from a JSON string.
pub fn parse_descriptor(json: &str, policy: ValidationPolicy) -> Result<Vec<FileNode>> {
    let raw: RawDescriptor = serde_json::from_str(json)?;
    normalise(raw, policy)
}

/// Parse a descriptor from any reader (file, stdin).
pub fn load_descriptor<R: Read>(reader: R, policy: ValidationPolicy) -> Result<Vec<FileNode>> {
    let raw: RawDescriptor = serde_json::from_reader(reader)?;
    normalise(raw, policy)
}

fn normalise(raw: RawDescriptor, policy: ValidationPolicy) -> Result<Vec<FileNode>> {
    let nodes = match raw {
        RawDescriptor::List(nodes) | RawDescriptor::Wrapped { files: nodes } => nodes,
    };
    nodes
        .into_iter()
        .map(|node| convert(node, "", policy))
        .collect()
}

/// Convert one raw node and its subtree.
///
/// Recursion depth is bounded by `serde_json`'s own nesting limit, which
/// the raw tree had to pass to exist at all.
fn convert(raw: RawNode, parent_path: &str, policy: ValidationPolicy) -> Result<FileNode> {
    let path = if parent_path.is_empty() {
        raw.name.to_string()
    } else {
        format!("{parent_path}/{}", raw.name)
    };

    if raw.is_directory {
        if raw.size.is_some() || raw.contents.is_some() || raw.mime_type.is_some() {
            reject_or_warn(policy, &path, "directory carries file fields")?;
        }
        let children = match raw.children {
            Some(children) => children,
            None => {
                reject_or_warn(policy, &path, "directory has no children field")?;
                Vec::new()
            }
        };
        let children = children
            .into_iter()
            .map(|child| convert(child, &path, policy))
            .collect::<Result<Vec<_>>>()?;
        return Ok(FileNode::Directory {
            name: raw.name,
            children,
        });
    }

    if raw.children.is_some() {
        reject_or_warn(policy, &path, "file carries children")?;
    }
    let size = match raw.size {
        Some(size) => size,
        None => {
            reject_or_warn(policy, &path, "file has no size")?;
            0
        }
    };
    let last_modified = match raw.last_modified_date {
        None => None,
        Some(RawTimestamp::Text(at)) => Some(at),
        Some(RawTimestamp::Millis(ms)) => {
            let at = DateTime::from_timestamp_millis(ms);
            if at.is_none() {
                reject_or_warn(policy, &path, "timestamp out of range")?;
            }
            at
        }
    };
    let contents = raw.contents.map(|c| match c {
        RawContents::Text(text) => text.into_bytes(),
        RawContents::Bytes(bytes) => bytes,
    });

    Ok(FileNode::File(FileEntry {
        name: raw.name,
        size,
        last_modified,
        contents,
        mime_type: raw.mime_type,
        source: None,
    }))
}

fn reject_or_warn(policy: ValidationPolicy, path: &str, reason: &str) -> Result<()> {
    match policy {
        ValidationPolicy::Strict => Err(ReportError::MalformedNode {
            path: path.to_string(),
            reason: reason.to_string(),
        }),
        ValidationPolicy::Lenient => {
            warn!(path, reason, "malformed descriptor node, using defaults");
            Ok(())
        }
    }
}
