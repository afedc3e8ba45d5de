//! Data collaborator contract consumed by the explorer controller

use crate::error::ExplorerError;
use tree_state::tree::{NodeId, TreeNode};

/// Result alias used across the collaborator boundary
pub type SourceResult<T> = Result<T, ExplorerError>;

/// External backing store for folder and file nodes
///
/// The controller is generic over this trait; calls suspend at this boundary
/// and nothing else in the engine is asynchronous. Implementations must
/// return direct children ordered by name ascending and must cascade deletes
/// to all descendants in the backing store.
#[allow(async_fn_in_trait)]
pub trait FolderSource {
    /// Full folder listing; root membership is derivable from `parent_id`
    async fn list_all(&self) -> SourceResult<Vec<TreeNode>>;

    /// One node with its loaded relations, or `None` if the identity is unknown
    async fn fetch_folder(&self, id: &NodeId) -> SourceResult<Option<TreeNode>>;

    /// Direct children of `parent_id` only, ordered by name ascending;
    /// empty if the parent is unknown
    async fn fetch_children(&self, parent_id: &NodeId) -> SourceResult<Vec<TreeNode>>;

    /// Create a folder under `parent_id` (or at the root) and return it
    async fn create(&mut self, name: &str, parent_id: Option<&NodeId>) -> SourceResult<TreeNode>;

    /// Rename a node and return its updated record
    async fn update(&mut self, id: &NodeId, name: &str) -> SourceResult<TreeNode>;

    /// Delete a node, cascading to all descendants in the backing store
    async fn delete(&mut self, id: &NodeId) -> SourceResult<()>;
}
