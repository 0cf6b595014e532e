//! Minimal index-based tree for unit tests of the core contracts.

use crate::dom::{DomTree, NodeKind};

struct TestNode {
    kind: NodeKind,
    parent: Option<usize>,
    children: Vec<usize>,
    tag: Option<String>,
    classes: Vec<String>,
    shadow_root: Option<usize>,
    host: Option<usize>,
}

pub(crate) struct TestTree {
    nodes: Vec<TestNode>,
}

impl TestTree {
    /// Creates a tree holding only the document (index 0).
    pub(crate) fn new() -> Self {
        Self { nodes: vec![Self::node(NodeKind::Document, None)] }
    }

    fn node(kind: NodeKind, parent: Option<usize>) -> TestNode {
        TestNode {
            kind,
            parent,
            children: Vec::new(),
            tag: None,
            classes: Vec::new(),
            shadow_root: None,
            host: None,
        }
    }

    pub(crate) fn element(&mut self, parent: usize, tag: &str, classes: &[&str]) -> usize {
        let index = self.nodes.len();
        let mut node = Self::node(NodeKind::Element, Some(parent));
        node.tag = Some(tag.to_owned());
        node.classes = classes.iter().map(|class| (*class).to_owned()).collect();
        self.nodes.push(node);
        self.nodes[parent].children.push(index);
        index
    }

    pub(crate) fn shadow(&mut self, host: usize) -> usize {
        let index = self.nodes.len();
        let mut node = Self::node(NodeKind::ShadowRoot, None);
        node.host = Some(host);
        self.nodes.push(node);
        self.nodes[host].shadow_root = Some(index);
        index
    }
}

impl DomTree for TestTree {
    type Node = usize;

    fn document(&self) -> usize {
        0
    }

    fn kind(&self, node: usize) -> NodeKind {
        self.nodes[node].kind
    }

    fn parent(&self, node: usize) -> Option<usize> {
        self.nodes[node].parent
    }

    fn children(&self, node: usize) -> Box<dyn Iterator<Item = usize> + '_> {
        Box::new(self.nodes[node].children.iter().copied())
    }

    fn tag_name(&self, node: usize) -> Option<&str> {
        self.nodes[node].tag.as_deref()
    }

    fn class_list(&self, node: usize) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.nodes[node].classes.iter().map(String::as_str))
    }

    fn shadow_root(&self, host: usize) -> Option<usize> {
        self.nodes[host].shadow_root
    }

    fn shadow_host(&self, root: usize) -> Option<usize> {
        self.nodes[root].host
    }
}
