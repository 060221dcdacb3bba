//! View module - the boundary to whatever renders the session.
//!
//! The session pushes every applied snapshot and the final close event into a
//! [`ViewBinder`]. Rendering itself happens outside this crate; [`JsonView`]
//! turns the state into a JSON document for hosts that render elsewhere.

mod icon;
mod json;

pub use icon::{icon_class_for_filename, DEFAULT_ICON_CLASS};
pub use json::JsonView;

use crate::codec::SessionMetadata;
use crate::session::CloseReason;
use crate::tree::FileTree;

/// Receiver of session state changes.
pub trait ViewBinder {
    /// Called with the metadata of every applied snapshot.
    fn render_metadata(&mut self, metadata: &SessionMetadata);

    /// Called with the tree of every applied snapshot, after its metadata.
    fn render_tree(&mut self, tree: &FileTree);

    /// Called once when the session closes.
    fn closed(&mut self, _reason: &CloseReason) {}
}

/// A view that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullView;

impl ViewBinder for NullView {
    fn render_metadata(&mut self, _metadata: &SessionMetadata) {}

    fn render_tree(&mut self, _tree: &FileTree) {}
}

impl<V: ViewBinder + ?Sized> ViewBinder for Box<V> {
    fn render_metadata(&mut self, metadata: &SessionMetadata) {
        (**self).render_metadata(metadata)
    }

    fn render_tree(&mut self, tree: &FileTree) {
        (**self).render_tree(tree)
    }

    fn closed(&mut self, reason: &CloseReason) {
        (**self).closed(reason)
    }
}
