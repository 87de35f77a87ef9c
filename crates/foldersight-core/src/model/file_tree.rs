/// Arena-backed tree flattened from the picker's nested `FileNode` input.
///
/// All nodes live in a single `Vec<TreeNode>` stored in **pre-order**: a
/// directory always precedes its descendants, and siblings keep their input
/// order. Relationships use `NodeIndex` (a thin `u32` wrapper) rather than
/// heap pointers, so traversal needs neither recursion nor a call stack
/// proportional to the folder depth.
use super::file_node::{FileEntry, FileNode, NodeIndex};
use compact_str::CompactString;

/// What a [`TreeNode`] holds besides its links.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Directory,
    File(FileEntry),
}

/// A single file or directory in the arena.
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Entry name only (NOT the full path).
    /// Full paths are reconstructed on demand by walking up via `parent`.
    pub name: CompactString,

    pub kind: NodeKind,

    /// Index of the parent node. `None` for top-level entries.
    pub parent: Option<NodeIndex>,

    /// First child (directories only). Children form a singly-linked list
    /// via [`next_sibling`](Self::next_sibling).
    pub first_child: Option<NodeIndex>,

    /// Tail of the child list, kept so appends preserve input order in O(1).
    pub last_child: Option<NodeIndex>,

    /// Next sibling under the same parent.
    pub next_sibling: Option<NodeIndex>,

    /// Nesting depth (0 = top-level entry).
    pub depth: u32,
}

impl TreeNode {
    fn new_dir(name: CompactString, parent: Option<NodeIndex>, depth: u32) -> Self {
        Self {
            name,
            kind: NodeKind::Directory,
            parent,
            first_child: None,
            last_child: None,
            next_sibling: None,
            depth,
        }
    }

    fn new_file(entry: FileEntry, parent: Option<NodeIndex>, depth: u32) -> Self {
        Self {
            name: entry.name.clone(),
            kind: NodeKind::File(entry),
            parent,
            first_child: None,
            last_child: None,
            next_sibling: None,
            depth,
        }
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        matches!(self.kind, NodeKind::Directory)
    }

    /// The file half of the node, `None` for directories.
    #[inline]
    pub fn file(&self) -> Option<&FileEntry> {
        match &self.kind {
            NodeKind::File(entry) => Some(entry),
            NodeKind::Directory => None,
        }
    }
}

/// The complete tree for one report.
#[derive(Debug, Clone, Default)]
pub struct FileTree {
    /// Arena: every node in pre-order.
    pub nodes: Vec<TreeNode>,

    /// Top-level entry indices, in input order.
    pub roots: Vec<NodeIndex>,
}

impl FileTree {
    /// Create an empty tree with pre-allocated capacity.
    pub fn with_capacity(estimated_nodes: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(estimated_nodes),
            roots: Vec::new(),
        }
    }

    /// Flatten the picker's top-level entries into an arena.
    ///
    /// Uses an explicit stack: entries are pushed in reverse so that pops
    /// come out first-to-last, which makes arena order the pre-order of the
    /// input and keeps every child list in input order.
    pub fn from_entries(entries: Vec<FileNode>) -> Self {
        let capacity = entries.iter().map(FileNode::node_count).sum();
        let mut tree = Self::with_capacity(capacity);

        let mut stack: Vec<(FileNode, Option<NodeIndex>, u32)> =
            entries.into_iter().rev().map(|node| (node, None, 0)).collect();

        while let Some((node, parent, depth)) = stack.pop() {
            let (tree_node, children) = match node {
                FileNode::Directory { name, children } => {
                    (TreeNode::new_dir(name, parent, depth), children)
                }
                FileNode::File(entry) => (TreeNode::new_file(entry, parent, depth), Vec::new()),
            };

            let idx = tree.add_node(tree_node);
            match parent {
                Some(parent_idx) => tree.add_child(parent_idx, idx),
                None => tree.roots.push(idx),
            }

            stack.extend(
                children
                    .into_iter()
                    .rev()
                    .map(|child| (child, Some(idx), depth + 1)),
            );
        }

        tree
    }

    /// Allocate a new node in the arena and return its index.
    fn add_node(&mut self, node: TreeNode) -> NodeIndex {
        let idx = NodeIndex::new(self.nodes.len());
        self.nodes.push(node);
        idx
    }

    /// Attach `child` at the end of `parent`'s child list. O(1).
    fn add_child(&mut self, parent: NodeIndex, child: NodeIndex) {
        match self.nodes[parent.idx()].last_child {
            Some(tail) => self.nodes[tail.idx()].next_sibling = Some(child),
            None => self.nodes[parent.idx()].first_child = Some(child),
        }
        self.nodes[parent.idx()].last_child = Some(child);
        self.nodes[child.idx()].parent = Some(parent);
    }

    /// Reconstruct the `/`-separated path of a node relative to the
    /// selected folder.
    pub fn full_path(&self, index: NodeIndex) -> String {
        let mut segments = Vec::new();
        let mut current = Some(index);
        while let Some(idx) = current {
            segments.push(self.nodes[idx.idx()].name.as_str());
            current = self.nodes[idx.idx()].parent;
        }
        segments.reverse();
        segments.join("/")
    }

    /// Direct children of a node, in input order.
    pub fn children(&self, parent: NodeIndex) -> Vec<NodeIndex> {
        let mut children = Vec::new();
        let mut child = self.nodes[parent.idx()].first_child;
        while let Some(idx) = child {
            children.push(idx);
            child = self.nodes[idx.idx()].next_sibling;
        }
        children
    }

    /// Get the node at the given index, if it exists.
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&TreeNode> {
        self.nodes.get(index.idx())
    }

    /// Get the node at the given index.
    #[inline]
    pub fn node(&self, index: NodeIndex) -> &TreeNode {
        &self.nodes[index.idx()]
    }

    /// Total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree contains no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
