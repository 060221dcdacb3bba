//! Tree node and node handle.

use serde::Serialize;

/// Index of a node in its [`FileTree`](super::FileTree).
///
/// Only meaningful for the tree that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The synthetic root of every tree.
    pub const ROOT: NodeId = NodeId(0);

    /// Position in the node table.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// One node of the file tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub(crate) path: String,
    pub(crate) entry_id: Option<u32>,
    pub(crate) is_directory: bool,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl TreeNode {
    pub(crate) fn root() -> Self {
        Self {
            path: String::new(),
            entry_id: None,
            is_directory: true,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Full `/`-delimited path; empty for the root.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Last path segment; empty for the root.
    pub fn name(&self) -> &str {
        self.path
            .rsplit_once('/')
            .map_or(self.path.as_str(), |(_, name)| name)
    }

    /// Wire id of the entry this node came from (`None` for the root).
    #[inline]
    pub fn entry_id(&self) -> Option<u32> {
        self.entry_id
    }

    #[inline]
    pub fn is_directory(&self) -> bool {
        self.is_directory
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Parent handle; `None` only for the root.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in display order. Always empty for files.
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Path with its final `/` segment removed; `""` means the root.
pub(crate) fn parent_path(path: &str) -> &str {
    path.rsplit_once('/').map_or("", |(parent, _)| parent)
}
