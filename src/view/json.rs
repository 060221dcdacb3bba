//! View that renders into a JSON document.
//!
//! Document shape:
//!
//! ```text
//! {
//!   "metadata": { "id": 7, "name": "proj", "description": "d", "owner_name": "o" },
//!   "tree": { "name": "", "path": "", "is_directory": true, "children": [ ... ] },
//!   "closed": "server disconnected"
//! }
//! ```
//!
//! Files carry `entry_id` and `icon` instead of `children`.

use serde_json::{json, Map, Value};

use super::{icon_class_for_filename, ViewBinder};
use crate::codec::SessionMetadata;
use crate::error::Result;
use crate::session::CloseReason;
use crate::tree::{FileTree, NodeId};

/// Keeps the latest rendered state as a `serde_json::Value`.
#[derive(Debug, Clone, Default)]
pub struct JsonView {
    document: Map<String, Value>,
}

impl JsonView {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current document.
    pub fn document(&self) -> Value {
        Value::Object(self.document.clone())
    }

    /// The current document serialized to a string.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.document)?)
    }
}

impl ViewBinder for JsonView {
    fn render_metadata(&mut self, metadata: &SessionMetadata) {
        match serde_json::to_value(metadata) {
            Ok(value) => {
                self.document.insert("metadata".into(), value);
            }
            Err(e) => tracing::error!("Failed to render metadata: {}", e),
        }
    }

    fn render_tree(&mut self, tree: &FileTree) {
        self.document
            .insert("tree".into(), node_json(tree, tree.root_id()));
    }

    fn closed(&mut self, reason: &CloseReason) {
        self.document
            .insert("closed".into(), Value::String(reason.to_string()));
    }
}

fn node_json(tree: &FileTree, id: NodeId) -> Value {
    let node = tree.get(id);
    if node.is_directory() {
        let children: Vec<Value> = node
            .children()
            .iter()
            .map(|&child| node_json(tree, child))
            .collect();
        json!({
            "name": node.name(),
            "path": node.path(),
            "is_directory": true,
            "children": children,
        })
    } else {
        json!({
            "name": node.name(),
            "path": node.path(),
            "is_directory": false,
            "entry_id": node.entry_id(),
            "icon": icon_class_for_filename(node.name()),
        })
    }
}
