use crate::tree::{MockDocumentLoadError, NodeSpec, parse_document};
use shadowpath_core::{DomTree, NodeKind};
use std::fmt;

/// Handle of a node inside a [`MockDocument`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub const DOCUMENT: NodeId = NodeId(0);

    fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

#[derive(Clone, Debug)]
enum NodeData {
    Document,
    Element(ElementData),
    ShadowRoot { host: NodeId },
}

#[derive(Clone, Debug)]
struct ElementData {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    shadow_root: Option<NodeId>,
}

#[derive(Clone, Debug)]
struct MockNode {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl MockNode {
    fn new(data: NodeData, parent: Option<NodeId>) -> Self {
        Self { data, parent, children: Vec::new() }
    }

    fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }
}

/// Arena-backed document with attached shadow trees.
///
/// Nodes are never freed: detached nodes stay addressable so tests can hold
/// on to a handle that no longer belongs to the live tree.
#[derive(Clone, Debug)]
pub struct MockDocument {
    nodes: Vec<MockNode>,
}

impl MockDocument {
    pub fn new() -> Self {
        Self { nodes: vec![MockNode::new(NodeData::Document, None)] }
    }

    pub fn from_specs(roots: Vec<NodeSpec>) -> Self {
        let mut document = Self::new();
        for spec in &roots {
            document.append_spec(NodeId::DOCUMENT, spec);
        }
        document
    }

    pub fn from_xml(xml: &str) -> Result<Self, MockDocumentLoadError> {
        parse_document(xml).map(Self::from_specs)
    }

    /// Instantiates `spec` (including its shadow tree) as last child of `parent`.
    pub fn append_spec(&mut self, parent: NodeId, spec: &NodeSpec) -> NodeId {
        let node = self.push(NodeData::Element(ElementData {
            tag: spec.tag().to_owned(),
            id: spec.id().map(str::to_owned),
            classes: spec.classes().to_vec(),
            shadow_root: None,
        }));
        self.insert_child(parent, node, None);

        if let Some(shadow_children) = spec.shadow_children()
            && let Some(root) = self.attach_shadow(node)
        {
            for child in shadow_children {
                self.append_spec(root, child);
            }
        }
        for child in spec.children() {
            self.append_spec(node, child);
        }
        node
    }

    /// Returns the shadow root of `host`, creating an empty one when missing.
    /// Only elements can host a shadow tree.
    pub fn attach_shadow(&mut self, host: NodeId) -> Option<NodeId> {
        self.nodes.get(host.index())?.as_element()?;
        if let Some(existing) = self.shadow_root(host) {
            return Some(existing);
        }
        let root = self.push(NodeData::ShadowRoot { host });
        if let NodeData::Element(element) = &mut self.nodes[host.index()].data {
            element.shadow_root = Some(root);
        }
        Some(root)
    }

    /// Removes `node` from its parent. The node keeps its subtree.
    pub fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.nodes.get(node.index()).and_then(|n| n.parent) else {
            return;
        };
        self.nodes[parent.index()].children.retain(|child| *child != node);
        self.nodes[node.index()].parent = None;
    }

    /// Puts a deep copy of `node` at its position and detaches the original.
    ///
    /// The copy is indistinguishable by tag, classes and id but is a different
    /// node.
    pub fn replace_with_clone(&mut self, node: NodeId) -> Option<NodeId> {
        let parent = self.nodes.get(node.index())?.parent?;
        self.nodes[node.index()].as_element()?;
        let position = self.nodes[parent.index()].children.iter().position(|child| *child == node)?;

        let clone = self.clone_subtree(node);
        self.detach(node);
        self.insert_child(parent, clone, Some(position));
        Some(clone)
    }

    pub fn set_classes<I, S>(&mut self, node: NodeId, classes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Some(NodeData::Element(element)) = self.nodes.get_mut(node.index()).map(|n| &mut n.data)
        {
            element.classes = classes.into_iter().map(Into::into).collect();
        }
    }

    /// Finds an attached element by its `id`, searching shadow trees as well.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.find_attached(NodeId::DOCUMENT, &|element| element.id.as_deref() == Some(id))
    }

    pub fn id_of(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node.index())?.as_element()?.id.as_deref()
    }

    /// Number of nodes ever created, detached ones included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).expect("mock document node limit exceeded"));
        self.nodes.push(MockNode::new(data, None));
        id
    }

    fn insert_child(&mut self, parent: NodeId, child: NodeId, position: Option<usize>) {
        self.nodes[child.index()].parent = Some(parent);
        let children = &mut self.nodes[parent.index()].children;
        match position {
            Some(index) if index <= children.len() => children.insert(index, child),
            _ => children.push(child),
        }
    }

    fn clone_subtree(&mut self, node: NodeId) -> NodeId {
        let source = self.nodes[node.index()].clone();
        let copy = match source.data {
            NodeData::Element(element) => {
                let shadow = element.shadow_root;
                let copy = self.push(NodeData::Element(ElementData { shadow_root: None, ..element }));
                if let Some(root) = shadow
                    && let Some(copy_root) = self.attach_shadow(copy)
                {
                    for child in self.nodes[root.index()].children.clone() {
                        let child_copy = self.clone_subtree(child);
                        self.insert_child(copy_root, child_copy, None);
                    }
                }
                copy
            }
            other => self.push(other),
        };
        for child in source.children {
            let child_copy = self.clone_subtree(child);
            self.insert_child(copy, child_copy, None);
        }
        copy
    }

    fn find_attached(&self, node: NodeId, predicate: &dyn Fn(&ElementData) -> bool) -> Option<NodeId> {
        let current = &self.nodes[node.index()];
        let shadow = match &current.data {
            NodeData::Element(element) => {
                if predicate(element) {
                    return Some(node);
                }
                element.shadow_root
            }
            _ => None,
        };
        shadow
            .into_iter()
            .chain(current.children.iter().copied())
            .find_map(|child| self.find_attached(child, predicate))
    }
}

impl Default for MockDocument {
    fn default() -> Self {
        const XML: &str = include_str!("../assets/mock_document.xml");
        Self::from_xml(XML).expect("embedded mock_document.xml could not be parsed")
    }
}

impl DomTree for MockDocument {
    type Node = NodeId;

    fn document(&self) -> NodeId {
        NodeId::DOCUMENT
    }

    fn kind(&self, node: NodeId) -> NodeKind {
        match self.nodes[node.index()].data {
            NodeData::Document => NodeKind::Document,
            NodeData::Element(_) => NodeKind::Element,
            NodeData::ShadowRoot { .. } => NodeKind::ShadowRoot,
        }
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.index())?.parent
    }

    fn children(&self, node: NodeId) -> Box<dyn Iterator<Item = NodeId> + '_> {
        Box::new(self.nodes[node.index()].children.iter().copied())
    }

    fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node.index())?.as_element().map(|element| element.tag.as_str())
    }

    fn class_list(&self, node: NodeId) -> Box<dyn Iterator<Item = &str> + '_> {
        match self.nodes.get(node.index()).and_then(MockNode::as_element) {
            Some(element) => Box::new(element.classes.iter().map(String::as_str)),
            None => Box::new(std::iter::empty()),
        }
    }

    fn shadow_root(&self, host: NodeId) -> Option<NodeId> {
        self.nodes.get(host.index())?.as_element()?.shadow_root
    }

    fn shadow_host(&self, root: NodeId) -> Option<NodeId> {
        match self.nodes.get(root.index())?.data {
            NodeData::ShadowRoot { host } => Some(host),
            _ => None,
        }
    }
}
