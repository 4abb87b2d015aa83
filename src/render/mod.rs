//! Output rendering: value tree, pruning, file writing

pub mod document;
pub mod prune;
pub mod writer;

pub use document::render_export;
pub use prune::prune_empty;
pub use writer::{export_file_name, to_pretty_json, write_export};

use serde_json::Value;

use crate::domain::Export;

/// Render the forest and prune it, as two separate passes.
pub fn render_pruned(export: &Export) -> Value {
    prune_empty(render_export(export))
}
