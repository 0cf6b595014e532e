mod query;

pub use query::{query_selector, query_selector_all};

use serde::Serialize;
use std::borrow::Cow;
use std::fmt::Debug;

/// Node name reported for the document container.
pub const DOCUMENT_NODE_NAME: &str = "#document";
/// Node name reported for shadow roots (document fragments in the DOM).
pub const FRAGMENT_NODE_NAME: &str = "#document-fragment";

/// Kind of a node as far as shadow-path generation is concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    Document,
    Element,
    /// Root of a component's shadow tree; owned by a host element.
    ShadowRoot,
}

/// Read-only view on a document tree including attached shadow trees.
///
/// `Node` is a cheap handle; handle equality is node identity.
pub trait DomTree {
    type Node: Copy + Eq + Debug;

    /// The document container every lookup starts from.
    fn document(&self) -> Self::Node;

    fn kind(&self, node: Self::Node) -> NodeKind;

    /// Parent in the tree the node lives in. Top-level nodes of a shadow
    /// tree report the shadow root, never the host.
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Light children in tree order. Shadow roots are not children of
    /// their host.
    fn children(&self, node: Self::Node) -> Box<dyn Iterator<Item = Self::Node> + '_>;

    /// Tag name as stored by the tree, `None` for anything but elements.
    fn tag_name(&self, node: Self::Node) -> Option<&str>;

    /// Class names in class-list order.
    fn class_list(&self, node: Self::Node) -> Box<dyn Iterator<Item = &str> + '_>;

    /// Shadow root attached to `host`, if any.
    fn shadow_root(&self, host: Self::Node) -> Option<Self::Node>;

    /// Host element owning the shadow root `root`.
    fn shadow_host(&self, root: Self::Node) -> Option<Self::Node>;

    fn node_name(&self, node: Self::Node) -> Cow<'_, str> {
        match self.kind(node) {
            NodeKind::Document => Cow::Borrowed(DOCUMENT_NODE_NAME),
            NodeKind::ShadowRoot => Cow::Borrowed(FRAGMENT_NODE_NAME),
            NodeKind::Element => Cow::Owned(self.tag_name(node).unwrap_or_default().to_ascii_uppercase()),
        }
    }

    fn is_shadow_root(&self, node: Self::Node) -> bool {
        self.kind(node) == NodeKind::ShadowRoot
    }
}
