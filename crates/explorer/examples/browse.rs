//! CLI example that drives a full explorer session against the in-memory
//! backend: load, lazy expand, select, create, rename, delete
//!
//! Usage:
//!   cargo run --example browse

use explorer::{Explorer, InMemorySource};
use tree_state::tree::{NodeId, TreeStore};

fn print_tree(explorer: &Explorer<InMemorySource>, heading: &str) {
    println!("{heading}");
    println!("═══════════════════════════════");
    let flat = explorer.flatten();
    for row in flat.visible_nodes() {
        let indent = "  ".repeat(row.level);
        let icon = if row.is_folder { "📁" } else { "📄" };
        let check = if explorer.store().is_selected(&row.id) {
            "[x]"
        } else if explorer.store().is_indeterminate(&row.id) {
            "[-]"
        } else {
            "[ ]"
        };
        println!("{indent}{check} {icon} {}", row.name);
    }
    println!();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut backend = InMemorySource::new();
    backend
        .seed_folder("workspace", None, "workspace")
        .seed_folder("docs", Some("workspace"), "docs")
        .seed_folder("media", None, "media")
        .seed_file("guide", Some("docs"), "guide.md")
        .seed_file("notes", Some("docs"), "notes.md")
        .seed_file("clip", Some("media"), "clip.mp4");

    let mut explorer = Explorer::new(TreeStore::new(), backend);

    explorer.load_structure().await?;
    print_tree(&explorer, "Initial listing:");

    // lazy loading: docs has no loaded children until expanded
    let docs = NodeId::from("docs");
    explorer.expand_folder(&NodeId::from("workspace")).await?;
    explorer.expand_folder(&docs).await?;
    print_tree(&explorer, "After expanding workspace/docs:");

    // checkbox selection propagates through the loaded branch
    explorer.store_mut().toggle_select(&docs);
    print_tree(&explorer, "After selecting docs:");

    let reports = explorer
        .create_folder("reports", Some(&NodeId::from("workspace")))
        .await?;
    explorer.update_folder(&reports.id, "quarterly reports").await?;
    explorer.delete_folder(&NodeId::from("media")).await?;
    print_tree(&explorer, "After create/rename/delete:");

    let stats = explorer.flatten().statistics();
    println!("Total nodes:    {}", stats.total_nodes);
    println!("Selected nodes: {}", stats.selected_nodes);
    println!("Max depth:      {}", stats.max_depth);

    Ok(())
}
