//! In-memory reference implementation of the collaborator contract

use crate::error::ExplorerError;
use crate::source::{FolderSource, SourceResult};
use std::collections::HashMap;
use tree_state::tree::{NodeId, TreeNode};

#[derive(Debug, Clone)]
struct Entry {
    id: String,
    parent_id: Option<String>,
    name: String,
    is_folder: bool,
}

/// `FolderSource` backed by a plain map, for tests and examples
///
/// Keeps the remote semantics honest: children list by name ascending,
/// deletes cascade to all descendants, and folders advertise unloaded
/// children through `has_more_children` so expansion drives a lazy fetch.
#[derive(Debug, Default)]
pub struct InMemorySource {
    entries: HashMap<String, Entry>,
    next_id: u64,
}

impl InMemorySource {
    /// Create an empty backing store
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a folder with a fixed identity
    pub fn seed_folder(&mut self, id: &str, parent_id: Option<&str>, name: &str) -> &mut Self {
        self.entries.insert(
            id.to_string(),
            Entry {
                id: id.to_string(),
                parent_id: parent_id.map(str::to_string),
                name: name.to_string(),
                is_folder: true,
            },
        );
        self
    }

    /// Seed a file with a fixed identity
    pub fn seed_file(&mut self, id: &str, parent_id: Option<&str>, name: &str) -> &mut Self {
        self.entries.insert(
            id.to_string(),
            Entry {
                id: id.to_string(),
                parent_id: parent_id.map(str::to_string),
                name: name.to_string(),
                is_folder: false,
            },
        );
        self
    }

    /// Number of entries currently stored
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the backing store is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn has_children(&self, id: &str) -> bool {
        self.entries
            .values()
            .any(|entry| entry.parent_id.as_deref() == Some(id))
    }

    fn children_of(&self, parent_id: &str) -> Vec<&Entry> {
        let mut children: Vec<&Entry> = self
            .entries
            .values()
            .filter(|entry| entry.parent_id.as_deref() == Some(parent_id))
            .collect();
        // name ascending; identity breaks ties deterministically
        children.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        children
    }

    fn to_node(&self, entry: &Entry) -> TreeNode {
        let parent_id = entry.parent_id.clone().map(NodeId::from);
        if entry.is_folder {
            TreeNode::folder(entry.id.as_str(), parent_id, entry.name.as_str())
                .with_more_children(self.has_children(&entry.id))
        } else {
            TreeNode::file(entry.id.as_str(), parent_id, entry.name.as_str())
        }
    }
}

impl FolderSource for InMemorySource {
    async fn list_all(&self) -> SourceResult<Vec<TreeNode>> {
        let mut folders: Vec<&Entry> = self
            .entries
            .values()
            .filter(|entry| entry.is_folder)
            .collect();
        folders.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(folders.into_iter().map(|entry| self.to_node(entry)).collect())
    }

    async fn fetch_folder(&self, id: &NodeId) -> SourceResult<Option<TreeNode>> {
        Ok(self
            .entries
            .get(id.as_str())
            .map(|entry| self.to_node(entry)))
    }

    async fn fetch_children(&self, parent_id: &NodeId) -> SourceResult<Vec<TreeNode>> {
        if parent_id.as_str().is_empty() {
            return Err(ExplorerError::Validation("folder id is required".into()));
        }
        if !self.entries.contains_key(parent_id.as_str()) {
            return Ok(Vec::new());
        }
        Ok(self
            .children_of(parent_id.as_str())
            .into_iter()
            .map(|entry| self.to_node(entry))
            .collect())
    }

    async fn create(&mut self, name: &str, parent_id: Option<&NodeId>) -> SourceResult<TreeNode> {
        if name.trim().is_empty() {
            return Err(ExplorerError::Validation("folder name is required".into()));
        }
        if let Some(parent) = parent_id {
            if !self.entries.contains_key(parent.as_str()) {
                return Err(ExplorerError::NotFound(format!(
                    "parent folder {parent}"
                )));
            }
        }

        self.next_id += 1;
        let id = format!("folder-{}", self.next_id);
        let entry = Entry {
            id: id.clone(),
            parent_id: parent_id.map(|p| p.as_str().to_string()),
            name: name.to_string(),
            is_folder: true,
        };
        let node = self.to_node(&entry);
        self.entries.insert(id, entry);
        Ok(node)
    }

    async fn update(&mut self, id: &NodeId, name: &str) -> SourceResult<TreeNode> {
        if name.trim().is_empty() {
            return Err(ExplorerError::Validation("folder name is required".into()));
        }
        let Some(entry) = self.entries.get_mut(id.as_str()) else {
            return Err(ExplorerError::NotFound(format!("folder {id}")));
        };
        entry.name = name.to_string();
        let entry = entry.clone();
        Ok(self.to_node(&entry))
    }

    async fn delete(&mut self, id: &NodeId) -> SourceResult<()> {
        if !self.entries.contains_key(id.as_str()) {
            return Err(ExplorerError::NotFound(format!("folder {id}")));
        }

        let mut stack = vec![id.as_str().to_string()];
        while let Some(current) = stack.pop() {
            let children: Vec<String> = self
                .entries
                .values()
                .filter(|entry| entry.parent_id.as_deref() == Some(current.as_str()))
                .map(|entry| entry.id.clone())
                .collect();
            stack.extend(children);
            self.entries.remove(&current);
        }
        Ok(())
    }
}
