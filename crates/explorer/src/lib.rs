// Explorer orchestration for the lazy folder tree
// This crate provides the data collaborator contract, the HTTP transport
// client, an in-memory reference backend, and the controller that keeps the
// tree store consistent with collaborator outcomes.

mod controller;
mod error;
mod http;
mod memory;
mod source;

pub use controller::Explorer;
pub use error::ExplorerError;
pub use http::{ApiEnvelope, HttpFolderSource, NodeRecord};
pub use memory::InMemorySource;
pub use source::{FolderSource, SourceResult};
