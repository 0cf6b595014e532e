use serde::Serialize;
use shadowpath_core::{DomTree, Selector};

/// Role of a recorded node within a [`ShadowPath`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryRole {
    /// The element the path leads to.
    Target,
    /// Host element whose shadow tree has to be entered.
    ShadowHost,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathEntry<N> {
    node: N,
    selector: Selector,
    role: EntryRole,
}

impl<N: Copy> PathEntry<N> {
    pub fn new(node: N, selector: Selector, role: EntryRole) -> Self {
        Self { node, selector, role }
    }

    pub fn node(&self) -> N {
        self.node
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub fn role(&self) -> EntryRole {
        self.role
    }
}

/// Chain of nodes from a target up to the document, one entry per shadow
/// boundary plus the target itself.
///
/// Entries are stored innermost first: index 0 is always the target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShadowPath<N> {
    entries: Vec<PathEntry<N>>,
}

impl<N: Copy> ShadowPath<N> {
    pub fn entries(&self) -> &[PathEntry<N>] {
        &self.entries
    }

    pub fn target(&self) -> &PathEntry<N> {
        &self.entries[0]
    }

    /// Entries in the order boundaries are crossed when descending.
    pub fn outer_to_inner(&self) -> impl ExactSizeIterator<Item = &PathEntry<N>> {
        self.entries.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true; a path holds at least its target.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn boundary_count(&self) -> usize {
        self.entries.len() - 1
    }
}

/// Walks from `start` up to the document, recording every shadow host on the
/// way.
///
/// The target is described with its classes, hosts by tag name only. Returns
/// `None` when no start node is given.
pub fn find_path<T>(tree: &T, start: Option<T::Node>) -> Option<ShadowPath<T::Node>>
where
    T: DomTree + ?Sized,
{
    let start = start?;
    let document = tree.document();
    let mut entries =
        vec![PathEntry::new(start, Selector::for_node(tree, start, true), EntryRole::Target)];

    let mut current = start;
    while current != document {
        let Some(mut parent) = tree.parent(current) else {
            break;
        };
        if tree.is_shadow_root(parent) {
            let Some(host) = tree.shadow_host(parent) else {
                break;
            };
            entries.push(PathEntry::new(
                host,
                Selector::for_node(tree, host, false),
                EntryRole::ShadowHost,
            ));
            parent = host;
        }
        current = parent;
    }

    tracing::debug!(entries = entries.len(), "shadow path recorded");
    Some(ShadowPath { entries })
}
