//! Deterministic synthetic documents with shadow trees.
//!
//! Documents are built from [`NodeSpec`] builders or loaded from XML and can
//! be mutated afterwards to reproduce pages that changed between recording
//! and resolving a locator.

mod document;
mod tree;

pub use document::{MockDocument, NodeId};
pub use tree::{MockDocumentLoadError, NodeSpec};
