/// Data model for the folder report.
///
/// [`FileNode`] is what the picker hands over; [`FileTree`] is the
/// arena the engine walks.
pub mod descriptor;
pub mod file_node;
pub mod file_tree;
pub mod size;

pub use descriptor::{load_descriptor, parse_descriptor, ValidationPolicy};
pub use file_node::{FileEntry, FileNode, NodeIndex};
pub use file_tree::{FileTree, NodeKind, TreeNode};
