//! Tree module - rebuilds the remote file hierarchy from a flat entry list.
//!
//! Nodes live in one table owned by [`FileTree`]; parent and child links are
//! [`NodeId`] indices into that table, so the tree holds no reference cycles.
//!
//! Sibling order is deterministic: directories before files, then
//! case-insensitive path, then exact path.

mod builder;
mod node;

use std::collections::HashMap;

pub use builder::build_tree;
pub use node::{NodeId, TreeNode};

/// A rooted, fully linked file tree.
///
/// Index 0 is always the synthetic root (`path == ""`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTree {
    nodes: Vec<TreeNode>,
    by_path: HashMap<String, NodeId>,
}

impl FileTree {
    /// Handle of the synthetic root.
    #[inline]
    pub fn root_id(&self) -> NodeId {
        NodeId::ROOT
    }

    /// The synthetic root node.
    #[inline]
    pub fn root(&self) -> &TreeNode {
        &self.nodes[0]
    }

    /// Look up a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` came from a different tree and is out of range.
    #[inline]
    pub fn get(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }

    /// Parent of `id`; `None` for the root.
    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).parent
    }

    /// Children of `id` in display order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &TreeNode> + '_ {
        self.get(id).children.iter().map(move |&child| self.get(child))
    }

    /// Find a node by exact path. `""` is the root.
    pub fn find(&self, path: &str) -> Option<NodeId> {
        self.by_path.get(path).copied()
    }

    /// Find the node built from the entry with wire id `entry_id`.
    pub fn find_by_entry_id(&self, entry_id: u32) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|node| node.entry_id == Some(entry_id))
            .map(NodeId)
    }

    /// Depth-first pre-order walk in display order, starting at the root
    /// (depth 0).
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            tree: self,
            stack: vec![(0, NodeId::ROOT)],
        }
    }

    /// Total number of nodes, root included.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree holds nothing but the root.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }
}

/// Iterator returned by [`FileTree::walk`].
pub struct Walk<'a> {
    tree: &'a FileTree,
    stack: Vec<(usize, NodeId)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, id) = self.stack.pop()?;
        let node = self.tree.get(id);
        self.stack
            .extend(node.children.iter().rev().map(|&child| (depth + 1, child)));
        Some((depth, node))
    }
}
