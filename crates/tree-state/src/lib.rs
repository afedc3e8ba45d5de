//! Tree State Library
//!
//! In-memory state engine for a lazily loaded folder/file hierarchy:
//! a canonical node store with tri-state selection propagation, and a
//! pure flattening pass that turns the sparse tree into an ordered,
//! level-annotated sequence for linear rendering.
//!
//! # Core Concepts
//!
//! - **TreeStore**: single source of truth; node map, root listing, and
//!   the expanded/selected/loading identity sets
//! - **Selection propagation**: selecting a folder covers its loaded
//!   subtree; ancestors reconcile to all-or-nothing, indeterminacy is
//!   derived on demand
//! - **FlatTree**: pre-order projection respecting expansion state, with
//!   sibling/path/statistics queries
//!
//! # Example
//!
//! ```
//! use tree_state::tree::prelude::*;
//!
//! let mut store = TreeStore::new();
//! store.set_nodes(vec![TreeNode::folder("docs", None, "Documents")], None);
//! store.set_nodes(
//!     vec![TreeNode::file("readme", Some("docs".into()), "README.md")],
//!     Some(&"docs".into()),
//! );
//! store.toggle_expand(&"docs".into());
//!
//! let flat = FlatTree::build(&store);
//! for row in flat.visible_nodes() {
//!     println!("{:indent$}{}", "", row.name, indent = row.level * 2);
//! }
//! ```

pub mod tree;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::tree::prelude::*;
}
