//! Core contracts for locating elements across shadow boundaries.
//!
//! The tree being inspected is never ambient: every operation receives a
//! [`DomTree`] context explicitly so the same logic runs against live
//! documents and synthetic test trees alike.

pub mod dom;
pub mod selector;

#[cfg(test)]
mod test_tree;

pub use dom::{DomTree, NodeKind, query_selector, query_selector_all};
pub use selector::{Selector, escape_class};
