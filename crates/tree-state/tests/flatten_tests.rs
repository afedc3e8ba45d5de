use pretty_assertions::assert_eq;
use tree_state::tree::prelude::*;

fn id(s: &str) -> NodeId {
    NodeId::from(s)
}

/// projects/
///   alpha/
///     src/
///       main.rs
///     Cargo.toml
///   beta/
///     notes.md
/// scratch.txt
fn sample_store() -> TreeStore {
    let mut store = TreeStore::new();
    store.set_nodes(
        vec![
            TreeNode::folder("projects", None, "projects").with_more_children(true),
            TreeNode::file("scratch", None, "scratch.txt"),
        ],
        None,
    );
    store.set_nodes(
        vec![
            TreeNode::folder("alpha", Some(id("projects")), "alpha").with_more_children(true),
            TreeNode::folder("beta", Some(id("projects")), "beta").with_more_children(true),
        ],
        Some(&id("projects")),
    );
    store.set_nodes(
        vec![
            TreeNode::folder("src", Some(id("alpha")), "src").with_more_children(true),
            TreeNode::file("cargo", Some(id("alpha")), "Cargo.toml"),
        ],
        Some(&id("alpha")),
    );
    store.set_nodes(
        vec![TreeNode::file("main", Some(id("src")), "main.rs")],
        Some(&id("src")),
    );
    store.set_nodes(
        vec![TreeNode::file("notes", Some(id("beta")), "notes.md")],
        Some(&id("beta")),
    );
    store
}

fn expand_all(store: &mut TreeStore) {
    for folder in ["projects", "alpha", "src", "beta"] {
        store.toggle_expand(&id(folder));
    }
}

fn row_ids(flat: &FlatTree) -> Vec<String> {
    flat.nodes().iter().map(|n| n.id.to_string()).collect()
}

#[test]
fn test_fully_expanded_traversal_order() {
    let mut store = sample_store();
    expand_all(&mut store);

    let flat = FlatTree::build(&store);
    assert_eq!(
        row_ids(&flat),
        vec!["projects", "alpha", "src", "main", "cargo", "beta", "notes", "scratch"]
    );
}

#[test]
fn test_collapse_hides_descendants_but_preserves_store() {
    let mut store = sample_store();
    expand_all(&mut store);

    store.toggle_expand(&id("alpha"));
    let flat = FlatTree::build(&store);
    assert_eq!(row_ids(&flat), vec!["projects", "alpha", "beta", "notes", "scratch"]);

    // the collapsed subtree is still loaded
    assert!(store.find_node(&id("main")).is_some());
    assert!(store.is_expanded(&id("src")));

    // re-expansion restores visibility without any re-fetch
    store.toggle_expand(&id("alpha"));
    let flat = FlatTree::build(&store);
    assert_eq!(flat.len(), 8);
}

#[test]
fn test_levels_and_last_child_flags() {
    let mut store = sample_store();
    expand_all(&mut store);
    let flat = FlatTree::build(&store);

    let src = flat.find(&id("src")).unwrap();
    assert_eq!(src.level, 2);
    assert!(!src.is_last_child);

    let cargo = flat.find(&id("cargo")).unwrap();
    assert!(cargo.is_last_child);

    let scratch = flat.find(&id("scratch")).unwrap();
    assert_eq!(scratch.level, 0);
    assert!(scratch.is_last_child);
}

#[test]
fn test_has_children_reflects_loaded_children_only() {
    let mut store = TreeStore::new();
    store.set_nodes(
        vec![TreeNode::folder("empty", None, "empty").with_more_children(true)],
        None,
    );
    let flat = FlatTree::build(&store);

    // unloaded children do not count
    assert!(!flat.find(&id("empty")).unwrap().has_children);
}

#[test]
fn test_sibling_lookup_skips_expanded_subtree() {
    let mut store = sample_store();
    expand_all(&mut store);
    let flat = FlatTree::build(&store);

    // alpha's subtree (src, main, cargo) sits between alpha and beta
    assert_eq!(flat.next_sibling(&id("alpha")).unwrap().id, id("beta"));
    assert_eq!(flat.previous_sibling(&id("beta")).unwrap().id, id("alpha"));

    assert!(flat.next_sibling(&id("beta")).is_none());
    assert!(flat.previous_sibling(&id("alpha")).is_none());
}

#[test]
fn test_cousins_are_not_siblings() {
    let mut store = sample_store();
    expand_all(&mut store);
    let flat = FlatTree::build(&store);

    // cargo (under alpha) and notes (under beta) share a level
    assert_eq!(flat.find(&id("cargo")).unwrap().level, 2);
    assert_eq!(flat.find(&id("notes")).unwrap().level, 2);
    assert!(flat.next_sibling(&id("cargo")).is_none());
    assert!(flat.previous_sibling(&id("notes")).is_none());
}

#[test]
fn test_children_and_parent_lookup() {
    let mut store = sample_store();
    expand_all(&mut store);
    let flat = FlatTree::build(&store);

    let children: Vec<_> = flat
        .children_of(&id("alpha"))
        .into_iter()
        .map(|n| n.id.to_string())
        .collect();
    assert_eq!(children, vec!["src", "cargo"]);

    assert_eq!(flat.parent_of(&id("main")).unwrap().id, id("src"));
    assert!(flat.parent_of(&id("projects")).is_none());
}

#[test]
fn test_breadcrumb_and_ancestor_test() {
    let mut store = sample_store();
    expand_all(&mut store);
    let flat = FlatTree::build(&store);

    assert_eq!(
        flat.breadcrumb(&id("main")),
        vec!["projects", "alpha", "src", "main.rs"]
    );
    assert_eq!(flat.depth_of(&id("main")), 3);

    assert!(flat.is_ancestor(&id("projects"), &id("main")));
    assert!(flat.is_ancestor(&id("src"), &id("main")));
    assert!(!flat.is_ancestor(&id("beta"), &id("main")));
    assert!(!flat.is_ancestor(&id("main"), &id("main")));
}

#[test]
fn test_statistics() {
    let mut store = sample_store();
    expand_all(&mut store);
    store.toggle_select(&id("beta"));

    let flat = FlatTree::build(&store);
    let stats = flat.statistics();

    assert_eq!(stats.total_nodes, 8);
    assert_eq!(stats.visible_nodes, 8);
    assert_eq!(stats.expanded_nodes, 4);
    // beta and notes.md
    assert_eq!(stats.selected_nodes, 2);
    assert_eq!(stats.max_depth, 3);
    assert_eq!(stats.nodes_by_level.get(&0), Some(&2));
    assert_eq!(stats.nodes_by_level.get(&1), Some(&2));
    assert_eq!(stats.nodes_by_level.get(&2), Some(&3));
    assert_eq!(stats.nodes_by_level.get(&3), Some(&1));
}

#[test]
fn test_stale_projection_detection() {
    let mut store = sample_store();
    let flat = FlatTree::build(&store);
    assert!(flat.is_current(&store));

    store.toggle_expand(&id("projects"));
    assert!(!flat.is_current(&store));

    let rebuilt = FlatTree::build(&store);
    assert!(rebuilt.is_current(&store));
    assert_eq!(rebuilt.len(), 4);
}
