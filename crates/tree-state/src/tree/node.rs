//! Core node types for the explorer tree

use derive_more::{Display, From};
use std::fmt;

/// Unique identifier for a node within the tree
///
/// Identities are issued by the backing store and are opaque to the engine;
/// they stay stable for the node's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, From)]
#[display(fmt = "{}", _0)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeId(String);

impl NodeId {
    /// Create a new NodeId from anything string-like
    pub fn new(id: impl Into<String>) -> Self {
        NodeId(id.into())
    }

    /// Get the raw identity string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        NodeId(id.to_string())
    }
}

/// A single folder or file entry in the hierarchy
///
/// `children_ids` holds only the children that have been loaded so far, in
/// the order the backing store returned them. `has_more_children` hints that
/// the backing store knows about children beyond what is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeNode {
    /// Backend-issued identity
    pub id: NodeId,
    /// Identity of the containing folder, `None` for root items
    pub parent_id: Option<NodeId>,
    /// Display label; not required to be unique within a parent
    pub name: String,
    /// Folders may have children, files never do
    pub is_folder: bool,
    /// Identities of the currently loaded direct children, in listing order
    pub children_ids: Vec<NodeId>,
    /// Whether unloaded children exist in the backing store
    pub has_more_children: bool,
}

impl TreeNode {
    /// Create a folder node with no children loaded yet
    pub fn folder(id: impl Into<NodeId>, parent_id: Option<NodeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent_id,
            name: name.into(),
            is_folder: true,
            children_ids: Vec::new(),
            has_more_children: false,
        }
    }

    /// Create a file node
    ///
    /// Files never carry children; `children_ids` stays empty and
    /// `has_more_children` stays false for the node's lifetime.
    pub fn file(id: impl Into<NodeId>, parent_id: Option<NodeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent_id,
            name: name.into(),
            is_folder: false,
            children_ids: Vec::new(),
            has_more_children: false,
        }
    }

    /// Set the loaded children list (folders only; a no-op for files)
    pub fn with_children(mut self, children: Vec<NodeId>) -> Self {
        if self.is_folder {
            self.children_ids = children;
        }
        self
    }

    /// Set the unloaded-children hint (folders only; a no-op for files)
    pub fn with_more_children(mut self, has_more: bool) -> Self {
        if self.is_folder {
            self.has_more_children = has_more;
        }
        self
    }

    /// Returns true if this node belongs to the top-level listing
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Returns true if at least one direct child is loaded
    pub fn has_loaded_children(&self) -> bool {
        !self.children_ids.is_empty()
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_folder { "folder" } else { "file" };
        write!(f, "{} ({})", self.name, kind)
    }
}
