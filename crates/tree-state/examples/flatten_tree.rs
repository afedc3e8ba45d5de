//! CLI example that builds a small tree, toggles state, and prints the
//! flattened projection
//!
//! Usage:
//!   cargo run --example flatten_tree

use tree_state::tree::prelude::*;

fn main() {
    let mut store = TreeStore::new();

    // Top-level listing
    store.set_nodes(
        vec![
            TreeNode::folder("projects", None, "projects").with_more_children(true),
            TreeNode::folder("music", None, "music").with_more_children(true),
            TreeNode::file("todo", None, "todo.txt"),
        ],
        None,
    );

    // Children arrive the way a lazy fetch would deliver them
    store.set_nodes(
        vec![
            TreeNode::folder("explorer", Some("projects".into()), "explorer")
                .with_more_children(true),
            TreeNode::file("ideas", Some("projects".into()), "ideas.md"),
        ],
        Some(&"projects".into()),
    );
    store.set_nodes(
        vec![
            TreeNode::file("lib", Some("explorer".into()), "lib.rs"),
            TreeNode::file("store", Some("explorer".into()), "store.rs"),
        ],
        Some(&"explorer".into()),
    );

    store.toggle_expand(&"projects".into());
    store.toggle_expand(&"explorer".into());
    store.toggle_select(&"explorer".into());

    let flat = FlatTree::build(&store);

    println!("Explorer view:");
    println!("═══════════════════════════════");
    for row in flat.visible_nodes() {
        let indent = "  ".repeat(row.level);
        let icon = if row.is_folder { "📁" } else { "📄" };
        let check = if store.is_selected(&row.id) {
            "[x]"
        } else if store.is_indeterminate(&row.id) {
            "[-]"
        } else {
            "[ ]"
        };
        println!("{indent}{check} {icon} {}", row.name);
    }

    println!();
    let stats = flat.statistics();
    println!("Total nodes:    {}", stats.total_nodes);
    println!("Visible nodes:  {}", stats.visible_nodes);
    println!("Selected nodes: {}", stats.selected_nodes);
    println!("Max depth:      {}", stats.max_depth);

    println!();
    println!(
        "Breadcrumb to store.rs: {}",
        flat.breadcrumb(&"store".into()).join(" / ")
    );
}
