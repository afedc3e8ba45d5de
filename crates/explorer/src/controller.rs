//! Explorer controller: lazy loading and CRUD orchestration
//!
//! The controller is the only writer that talks to the data collaborator.
//! Every operation calls the collaborator first and mutates the injected
//! store only on success; the loading set is the sole state other readers
//! can observe while a call is suspended.

use crate::error::ExplorerError;
use crate::source::FolderSource;
use log::{debug, warn};
use std::collections::HashMap;
use tree_state::tree::{FlatTree, NodeId, TreeNode, TreeStore};

/// Orchestrates one explorer session over an injected store and collaborator
pub struct Explorer<S> {
    store: TreeStore,
    source: S,
    focused: Option<NodeId>,
    is_loading: bool,
    error: Option<String>,
}

impl<S: FolderSource> Explorer<S> {
    /// Create a controller around an explicit store and collaborator
    pub fn new(store: TreeStore, source: S) -> Self {
        Self {
            store,
            source,
            focused: None,
            is_loading: false,
            error: None,
        }
    }

    /// Read access to the canonical store
    pub fn store(&self) -> &TreeStore {
        &self.store
    }

    /// Mutable access for UI selection/expansion gestures
    pub fn store_mut(&mut self) -> &mut TreeStore {
        &mut self.store
    }

    /// The collaborator this session talks to
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the collaborator
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Build the current render projection
    pub fn flatten(&self) -> FlatTree {
        FlatTree::build(&self.store)
    }

    /// Load the full folder structure from the collaborator
    ///
    /// Root membership is derived from the listing (`parent_id == None`);
    /// each parent's child group is merged through the store's destructive
    /// replace, so a reload fully supersedes the previous structure.
    pub async fn load_structure(&mut self) -> Result<(), ExplorerError> {
        self.error = None;
        self.is_loading = true;
        let result = self.source.list_all().await;
        self.is_loading = false;

        match result {
            Ok(listing) => {
                debug!("loaded structure with {} nodes", listing.len());
                self.merge_listing(listing);
                Ok(())
            }
            Err(err) => Err(self.fail("load structure", err)),
        }
    }

    fn merge_listing(&mut self, listing: Vec<TreeNode>) {
        let mut roots = Vec::new();
        let mut groups: Vec<(NodeId, Vec<TreeNode>)> = Vec::new();
        let mut index: HashMap<NodeId, usize> = HashMap::new();

        for node in listing {
            match node.parent_id.clone() {
                None => roots.push(node),
                Some(parent_id) => match index.get(&parent_id) {
                    Some(&at) => groups[at].1.push(node),
                    None => {
                        index.insert(parent_id.clone(), groups.len());
                        groups.push((parent_id, vec![node]));
                    }
                },
            }
        }

        self.store.set_nodes(roots, None);

        // Wire child groups parents-first; the listing carries no order
        // guarantee, so a group may arrive before its parent does.
        let mut pending = groups;
        while !pending.is_empty() {
            let (ready, rest): (Vec<_>, Vec<_>) = pending
                .into_iter()
                .partition(|(parent_id, _)| self.store.find_node(parent_id).is_some());

            if ready.is_empty() {
                // dangling parents: keep the nodes, leave the lists unwired
                for (parent_id, nodes) in rest {
                    warn!("listing references unknown parent {parent_id}");
                    self.store.set_nodes(nodes, Some(&parent_id));
                }
                break;
            }
            for (parent_id, nodes) in ready {
                self.store.set_nodes(nodes, Some(&parent_id));
            }
            pending = rest;
        }
    }

    /// Toggle a folder's expansion, lazily fetching children on first expand
    ///
    /// A fetch is issued only when the folder ends up expanded with no
    /// loaded children and the backing store advertises more. Loading-set
    /// membership acts as the fetch mutex; the mark is cleared on success
    /// and failure alike. Collapsing never discards loaded children.
    pub async fn expand_folder(&mut self, id: &NodeId) -> Result<(), ExplorerError> {
        self.error = None;
        let Some(node) = self.store.find_node(id) else {
            return Ok(());
        };
        if !node.is_folder {
            return Ok(());
        }
        let unloaded = node.children_ids.is_empty() && node.has_more_children;

        self.store.toggle_expand(id);
        if !self.store.is_expanded(id) || !unloaded {
            return Ok(());
        }
        if self.store.is_loading(id) {
            debug!("child fetch already in flight for {id}");
            return Ok(());
        }

        self.store.begin_loading(id);
        let result = self.source.fetch_children(id).await;
        self.store.finish_loading(id);

        match result {
            Ok(children) => {
                debug!("loaded {} children for {id}", children.len());
                self.store.set_nodes(children, Some(id));
                Ok(())
            }
            Err(err) => Err(self.fail("expand folder", err)),
        }
    }

    /// Create a folder via the collaborator, then link it into the store
    pub async fn create_folder(
        &mut self,
        name: &str,
        parent_id: Option<&NodeId>,
    ) -> Result<TreeNode, ExplorerError> {
        self.error = None;
        match self.source.create(name, parent_id).await {
            Ok(node) => {
                debug!("created folder {} under {:?}", node.id, parent_id);
                self.store.insert_node(node.clone());
                Ok(node)
            }
            Err(err) => Err(self.fail("create folder", err)),
        }
    }

    /// Rename a folder via the collaborator, then rename it in the store
    ///
    /// Only the collaborator's confirmed name is applied; the local
    /// loaded-children bookkeeping stays as it was.
    pub async fn update_folder(
        &mut self,
        id: &NodeId,
        name: &str,
    ) -> Result<TreeNode, ExplorerError> {
        self.error = None;
        match self.source.update(id, name).await {
            Ok(node) => {
                self.store.rename_node(id, node.name.clone());
                Ok(node)
            }
            Err(err) => Err(self.fail("update folder", err)),
        }
    }

    /// Delete a folder via the collaborator, then unlink its whole subtree
    pub async fn delete_folder(&mut self, id: &NodeId) -> Result<(), ExplorerError> {
        self.error = None;
        match self.source.delete(id).await {
            Ok(()) => {
                self.store.remove_node(id);
                if self
                    .focused
                    .as_ref()
                    .is_some_and(|focused| self.store.find_node(focused).is_none())
                {
                    self.focused = None;
                }
                Ok(())
            }
            Err(err) => Err(self.fail("delete folder", err)),
        }
    }

    fn fail(&mut self, operation: &str, err: ExplorerError) -> ExplorerError {
        warn!("{operation} failed: {err}");
        self.error = Some(err.to_string());
        err
    }

    /// Highlight one folder; distinct from checkbox selection
    pub fn focus_folder(&mut self, id: &NodeId) {
        self.focused = Some(id.clone());
    }

    /// The highlighted folder, if it is still in the store
    pub fn focused_folder(&self) -> Option<&TreeNode> {
        self.focused.as_ref().and_then(|id| self.store.find_node(id))
    }

    /// Drop the highlight
    pub fn clear_focus(&mut self) {
        self.focused = None;
    }

    /// Nodes covered by the checkbox selection
    pub fn selected_nodes(&self) -> Vec<&TreeNode> {
        self.store
            .selected_ids()
            .filter_map(|id| self.store.find_node(id))
            .collect()
    }

    /// Whether the initial structure load is in flight
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Message from the most recent failed operation, if any
    ///
    /// Starting a new operation clears it; errors are session-transient.
    pub fn last_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Clear the error slot explicitly
    pub fn clear_error(&mut self) {
        self.error = None;
    }
}
