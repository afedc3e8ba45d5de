//! Canonical node store with tri-state selection propagation
//!
//! The store is the single source of truth for the explorer: a sparse map of
//! loaded nodes, the ordered root listing, and the expanded/selected/loading
//! identity sets. All mutations are synchronous and run to completion; the
//! read side derives projections from whatever state is current.

use crate::tree::{NodeId, TreeNode};
use std::collections::{HashMap, HashSet};

/// In-memory tree state for one explorer session
///
/// Constructed empty and handed to its consumers explicitly; the store has
/// no ambient global instance. Selection is tri-state: a folder is selected,
/// unselected, or indeterminate relative to its direct children, and only
/// the first two are ever stored. Indeterminacy is derived on demand.
#[derive(Debug, Default)]
pub struct TreeStore {
    /// Loaded nodes by identity
    nodes: HashMap<NodeId, TreeNode>,
    /// Ordered top-level listing
    root_ids: Vec<NodeId>,
    /// Folders currently expanded
    expanded: HashSet<NodeId>,
    /// Fully selected nodes (never indeterminate ones)
    selected: HashSet<NodeId>,
    /// Folders with a child fetch in flight
    loading: HashSet<NodeId>,
    /// Bumped on every mutation so projections can detect staleness
    revision: u64,
}

impl TreeStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Insert or overwrite each node by identity
    ///
    /// With no parent the given nodes become the complete root listing,
    /// replacing any prior one. With a parent, the parent's loaded-children
    /// list is replaced wholesale by the given nodes in the given order;
    /// a re-fetch fully supersedes the previous child set, no merge is
    /// performed. A missing parent leaves the lists untouched (dangling
    /// parents are a bug state) but the nodes are still inserted.
    pub fn set_nodes(&mut self, nodes: Vec<TreeNode>, parent_id: Option<&NodeId>) {
        let ids: Vec<NodeId> = nodes.iter().map(|n| n.id.clone()).collect();

        for node in nodes {
            self.nodes.insert(node.id.clone(), node);
        }

        match parent_id {
            None => self.root_ids = ids,
            Some(pid) => {
                if let Some(parent) = self.nodes.get_mut(pid) {
                    parent.children_ids = ids;
                }
            }
        }

        self.touch();
    }

    /// Insert one node and link it into its parent's children (or the root
    /// listing), appending only if the identity is not already present
    ///
    /// This is the create path; unlike [`set_nodes`](Self::set_nodes) it
    /// never displaces siblings.
    pub fn insert_node(&mut self, node: TreeNode) {
        let id = node.id.clone();
        let parent_id = node.parent_id.clone();
        self.nodes.insert(id.clone(), node);

        match parent_id {
            None => {
                if !self.root_ids.contains(&id) {
                    self.root_ids.push(id);
                }
            }
            Some(pid) => {
                if let Some(parent) = self.nodes.get_mut(&pid) {
                    if !parent.children_ids.contains(&id) {
                        parent.children_ids.push(id);
                    }
                }
            }
        }

        self.touch();
    }

    /// Rename a node in place
    ///
    /// Only the label changes; the loaded-children bookkeeping is preserved.
    /// Returns false if the identity is unknown.
    pub fn rename_node(&mut self, id: &NodeId, name: impl Into<String>) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.name = name.into();
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Remove a node and its entire loaded subtree
    ///
    /// The node is unlinked from its parent's children (or the root
    /// listing), and every reachable descendant is purged from the node map
    /// and from the expanded/selected/loading sets, matching the backing
    /// store's cascading delete. Returns false if the identity is unknown.
    pub fn remove_node(&mut self, id: &NodeId) -> bool {
        let Some(parent_id) = self.nodes.get(id).map(|n| n.parent_id.clone()) else {
            return false;
        };

        match parent_id {
            Some(pid) => {
                if let Some(parent) = self.nodes.get_mut(&pid) {
                    parent.children_ids.retain(|c| c != id);
                }
            }
            None => self.root_ids.retain(|r| r != id),
        }

        let mut stack = vec![id.clone()];
        while let Some(current) = stack.pop() {
            if let Some(removed) = self.nodes.remove(&current) {
                stack.extend(removed.children_ids);
            }
            self.expanded.remove(&current);
            self.selected.remove(&current);
            self.loading.remove(&current);
        }

        self.touch();
        true
    }

    /// Look up a node by identity
    pub fn find_node(&self, id: &NodeId) -> Option<&TreeNode> {
        self.nodes.get(id)
    }

    /// Flip a node's membership in the expanded set
    ///
    /// No side effect on children: collapsing keeps loaded children in the
    /// store for instant re-expansion.
    pub fn toggle_expand(&mut self, id: &NodeId) {
        if !self.nodes.contains_key(id) {
            return;
        }
        if !self.expanded.remove(id) {
            self.expanded.insert(id.clone());
        }
        self.touch();
    }

    /// Toggle selection of a node, propagating through the loaded tree
    ///
    /// Selecting covers the node and every loaded descendant; unselecting
    /// removes the same set. Afterwards the ancestor chain is reconciled:
    /// a folder is selected iff all of its loaded direct children are.
    /// Unknown identities are ignored.
    pub fn toggle_select(&mut self, id: &NodeId) {
        if !self.nodes.contains_key(id) {
            return;
        }

        if self.selected.contains(id) {
            self.unselect_branch(id);
        } else {
            self.select_branch(id);
        }
        self.reconcile_ancestors(id);

        self.touch();
    }

    // Explicit stacks here and in remove_node: propagation must not be
    // limited by call depth on deep hierarchies.
    fn select_branch(&mut self, id: &NodeId) {
        let mut stack = vec![id.clone()];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get(&current) {
                stack.extend(node.children_ids.iter().cloned());
                self.selected.insert(current);
            }
        }
    }

    fn unselect_branch(&mut self, id: &NodeId) {
        let mut stack = vec![id.clone()];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get(&current) {
                stack.extend(node.children_ids.iter().cloned());
                self.selected.remove(&current);
            }
        }
    }

    fn reconcile_ancestors(&mut self, id: &NodeId) {
        let mut current = self.nodes.get(id).and_then(|n| n.parent_id.clone());

        while let Some(parent_id) = current {
            let Some(parent) = self.nodes.get(&parent_id) else {
                break;
            };
            let next = parent.parent_id.clone();

            if parent
                .children_ids
                .iter()
                .all(|child| self.selected.contains(child))
            {
                self.selected.insert(parent_id);
            } else {
                // Covers both none-selected and the mixed (indeterminate)
                // case; indeterminacy is derived, never stored.
                self.selected.remove(&parent_id);
            }

            current = next;
        }
    }

    /// Whether the node is currently expanded
    pub fn is_expanded(&self, id: &NodeId) -> bool {
        self.expanded.contains(id)
    }

    /// Whether the node is fully selected
    pub fn is_selected(&self, id: &NodeId) -> bool {
        self.selected.contains(id)
    }

    /// Whether a child fetch is in flight for the node
    pub fn is_loading(&self, id: &NodeId) -> bool {
        self.loading.contains(id)
    }

    /// Whether the folder has a mixed-selection direct child set
    ///
    /// Derived on demand from direct children only; a folder whose children
    /// are all themselves fully selected reports as selected, not
    /// indeterminate, relying on ancestor reconciliation having run after
    /// every mutation.
    pub fn is_indeterminate(&self, id: &NodeId) -> bool {
        let Some(node) = self.nodes.get(id) else {
            return false;
        };
        if !node.is_folder {
            return false;
        }

        let mut has_selected = false;
        let mut has_unselected = false;
        for child in &node.children_ids {
            if self.selected.contains(child) {
                has_selected = true;
            } else {
                has_unselected = true;
            }
        }
        has_selected && has_unselected
    }

    /// Mark a folder as having a child fetch in flight
    ///
    /// Loading-set membership doubles as the fetch mutex: callers skip the
    /// fetch when the folder is already marked.
    pub fn begin_loading(&mut self, id: &NodeId) {
        if !self.nodes.contains_key(id) {
            return;
        }
        self.loading.insert(id.clone());
        self.touch();
    }

    /// Clear the in-flight mark; runs on both success and failure paths
    pub fn finish_loading(&mut self, id: &NodeId) {
        self.loading.remove(id);
        self.touch();
    }

    /// The ordered top-level listing
    pub fn root_ids(&self) -> &[NodeId] {
        &self.root_ids
    }

    /// Number of loaded nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether nothing is loaded
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over the fully selected identities, in no particular order
    pub fn selected_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.selected.iter()
    }

    /// Number of fully selected nodes
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Number of expanded folders
    pub fn expanded_count(&self) -> usize {
        self.expanded.len()
    }

    /// Mutation counter; projections built at an older revision are stale
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
