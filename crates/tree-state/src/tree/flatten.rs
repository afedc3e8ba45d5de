//! Read-side flattening of the store into a renderable sequence
//!
//! Flattening is re-derived from the canonical store rather than patched
//! incrementally: every derived fact is a pure function of current store
//! state, at the cost of an O(n) traversal per build. [`FlatTree`] snapshots
//! the store revision it was built from, so callers can keep one projection
//! per mutation instead of rebuilding on every read.

use crate::tree::{NodeId, TreeStore};
use std::collections::BTreeMap;

/// One row of the flattened projection
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlattenedNode {
    /// Identity of the underlying node
    pub id: NodeId,
    /// Display label, copied from the store
    pub name: String,
    /// Folder or file
    pub is_folder: bool,
    /// Indentation depth, root = 0
    pub level: usize,
    /// True iff every ancestor up to the root is expanded
    pub is_visible: bool,
    /// True iff at least one direct child is loaded
    pub has_children: bool,
    /// True iff this is the final entry of its sibling group
    pub is_last_child: bool,
    /// Ancestor identities from root to self, self included
    pub parent_path: Vec<NodeId>,
}

impl FlattenedNode {
    /// Identity of the immediate parent (second-to-last path entry)
    pub fn parent_id(&self) -> Option<&NodeId> {
        self.parent_path
            .len()
            .checked_sub(2)
            .map(|i| &self.parent_path[i])
    }
}

/// Aggregate statistics over one flattened projection
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeStats {
    pub total_nodes: usize,
    pub visible_nodes: usize,
    pub expanded_nodes: usize,
    pub selected_nodes: usize,
    pub max_depth: usize,
    pub nodes_by_level: BTreeMap<usize, usize>,
}

struct Frame {
    id: NodeId,
    level: usize,
    visible: bool,
    is_last: bool,
    parent_path: Vec<NodeId>,
}

/// Ordered, level-annotated projection of a [`TreeStore`]
///
/// Produced by pre-order depth-first traversal over the root listing.
/// Children of a collapsed folder are absent from the sequence entirely;
/// they reappear on expansion without a re-fetch. All queries scan the
/// already-built sequence linearly.
#[derive(Debug, Clone)]
pub struct FlatTree {
    nodes: Vec<FlattenedNode>,
    expanded_nodes: usize,
    selected_nodes: usize,
    revision: u64,
}

impl FlatTree {
    /// Flatten the store's current state
    pub fn build(store: &TreeStore) -> Self {
        let mut nodes = Vec::new();
        // Explicit stack: traversal depth must not be limited by call depth.
        let mut stack: Vec<Frame> = Vec::new();
        push_group(&mut stack, store.root_ids(), 0, &[], true);

        while let Some(frame) = stack.pop() {
            let Some(node) = store.find_node(&frame.id) else {
                continue;
            };

            let mut parent_path = frame.parent_path;
            parent_path.push(frame.id.clone());

            let has_children = node.has_loaded_children();
            // Children are visited only when the node is expanded and itself
            // visible; by construction every descended-into row is visible.
            if has_children && frame.visible && store.is_expanded(&frame.id) {
                push_group(&mut stack, &node.children_ids, frame.level + 1, &parent_path, true);
            }

            nodes.push(FlattenedNode {
                id: frame.id,
                name: node.name.clone(),
                is_folder: node.is_folder,
                level: frame.level,
                is_visible: frame.visible,
                has_children,
                is_last_child: frame.is_last,
                parent_path,
            });
        }

        Self {
            nodes,
            expanded_nodes: store.expanded_count(),
            selected_nodes: store.selected_count(),
            revision: store.revision(),
        }
    }

    /// Whether this projection still matches the store's revision
    pub fn is_current(&self, store: &TreeStore) -> bool {
        self.revision == store.revision()
    }

    /// The full flattened sequence, in traversal order
    pub fn nodes(&self) -> &[FlattenedNode] {
        &self.nodes
    }

    /// Number of rows in the projection
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the projection is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn position(&self, id: &NodeId) -> Option<usize> {
        self.nodes.iter().position(|n| &n.id == id)
    }

    /// Look up a row by identity
    pub fn find(&self, id: &NodeId) -> Option<&FlattenedNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    /// Rows whose ancestors are all expanded
    pub fn visible_nodes(&self) -> impl Iterator<Item = &FlattenedNode> {
        self.nodes.iter().filter(|n| n.is_visible)
    }

    /// Rows at the given indentation level
    pub fn nodes_at_level(&self, level: usize) -> impl Iterator<Item = &FlattenedNode> {
        self.nodes.iter().filter(move |n| n.level == level)
    }

    /// Rows along the node's ancestor path, root first, self included
    pub fn node_path(&self, id: &NodeId) -> Vec<&FlattenedNode> {
        let Some(node) = self.find(id) else {
            return Vec::new();
        };
        node.parent_path
            .iter()
            .filter_map(|path_id| self.find(path_id))
            .collect()
    }

    /// Names along the node's ancestor path, root first, self included
    pub fn breadcrumb(&self, id: &NodeId) -> Vec<&str> {
        self.node_path(id)
            .into_iter()
            .map(|n| n.name.as_str())
            .collect()
    }

    /// Indentation level of the node, 0 if absent
    pub fn depth_of(&self, id: &NodeId) -> usize {
        self.find(id).map(|n| n.level).unwrap_or(0)
    }

    /// The following row in the same sibling group
    ///
    /// Skips over any intervening expanded subtree; stops once traversal
    /// leaves the parent's region.
    pub fn next_sibling(&self, id: &NodeId) -> Option<&FlattenedNode> {
        let pos = self.position(id)?;
        let node = &self.nodes[pos];
        for candidate in &self.nodes[pos + 1..] {
            if candidate.level < node.level {
                break;
            }
            if candidate.level == node.level && candidate.parent_id() == node.parent_id() {
                return Some(candidate);
            }
        }
        None
    }

    /// The preceding row in the same sibling group
    pub fn previous_sibling(&self, id: &NodeId) -> Option<&FlattenedNode> {
        let pos = self.position(id)?;
        let node = &self.nodes[pos];
        for candidate in self.nodes[..pos].iter().rev() {
            if candidate.level < node.level {
                break;
            }
            if candidate.level == node.level && candidate.parent_id() == node.parent_id() {
                return Some(candidate);
            }
        }
        None
    }

    /// Rows whose immediate parent is the given node
    pub fn children_of(&self, id: &NodeId) -> Vec<&FlattenedNode> {
        self.nodes
            .iter()
            .filter(|n| n.parent_id() == Some(id))
            .collect()
    }

    /// Row of the node's immediate parent
    pub fn parent_of(&self, id: &NodeId) -> Option<&FlattenedNode> {
        let parent_id = self.find(id)?.parent_id()?;
        self.find(parent_id)
    }

    /// Whether `ancestor` appears on `descendant`'s path
    pub fn is_ancestor(&self, ancestor: &NodeId, descendant: &NodeId) -> bool {
        match self.find(descendant) {
            Some(node) => &node.id != ancestor && node.parent_path.contains(ancestor),
            None => false,
        }
    }

    /// Aggregate counts over this projection
    pub fn statistics(&self) -> TreeStats {
        let mut max_depth = 0;
        let mut nodes_by_level = BTreeMap::new();
        for node in &self.nodes {
            max_depth = max_depth.max(node.level);
            *nodes_by_level.entry(node.level).or_insert(0) += 1;
        }

        TreeStats {
            total_nodes: self.nodes.len(),
            visible_nodes: self.visible_nodes().count(),
            expanded_nodes: self.expanded_nodes,
            selected_nodes: self.selected_nodes,
            max_depth,
            nodes_by_level,
        }
    }
}

fn push_group(
    stack: &mut Vec<Frame>,
    ids: &[NodeId],
    level: usize,
    parent_path: &[NodeId],
    visible: bool,
) {
    // Reverse push so siblings pop in listing order.
    for (index, id) in ids.iter().enumerate().rev() {
        stack.push(Frame {
            id: id.clone(),
            level,
            visible,
            is_last: index == ids.len() - 1,
            parent_path: parent_path.to_vec(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::TreeNode;

    fn id(s: &str) -> NodeId {
        NodeId::from(s)
    }

    fn sample_store() -> TreeStore {
        let mut store = TreeStore::new();
        store.set_nodes(
            vec![
                TreeNode::folder("a", None, "a").with_more_children(true),
                TreeNode::file("z", None, "z"),
            ],
            None,
        );
        store.set_nodes(
            vec![
                TreeNode::folder("b", Some(id("a")), "b"),
                TreeNode::file("c", Some(id("a")), "c"),
            ],
            Some(&id("a")),
        );
        store
    }

    #[test]
    fn test_collapsed_children_absent() {
        let store = sample_store();
        let flat = FlatTree::build(&store);

        let ids: Vec<_> = flat.nodes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "z"]);
    }

    #[test]
    fn test_expanded_preorder_and_levels() {
        let mut store = sample_store();
        store.toggle_expand(&id("a"));
        let flat = FlatTree::build(&store);

        let rows: Vec<_> = flat
            .nodes()
            .iter()
            .map(|n| (n.id.as_str(), n.level, n.is_last_child))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("a", 0, false),
                ("b", 1, false),
                ("c", 1, true),
                ("z", 0, true),
            ]
        );
    }

    #[test]
    fn test_parent_path_includes_self() {
        let mut store = sample_store();
        store.toggle_expand(&id("a"));
        let flat = FlatTree::build(&store);

        let b = flat.find(&id("b")).unwrap();
        assert_eq!(b.parent_path, vec![id("a"), id("b")]);
        assert_eq!(b.parent_id(), Some(&id("a")));

        let a = flat.find(&id("a")).unwrap();
        assert_eq!(a.parent_path, vec![id("a")]);
        assert_eq!(a.parent_id(), None);
    }

    #[test]
    fn test_is_current_tracks_revision() {
        let mut store = sample_store();
        let flat = FlatTree::build(&store);
        assert!(flat.is_current(&store));

        store.toggle_expand(&id("a"));
        assert!(!flat.is_current(&store));
    }
}
