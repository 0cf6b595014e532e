use crate::dom::{DomTree, NodeKind};
use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;

/// Compound selector of the form `tag.class1.class2`.
///
/// The textual form is what external tools receive; the parsed tag and class
/// list are what matching uses, so both always agree on what a selector
/// means. Selectors built from nodes without a tag name carry the node name
/// (`#document`, `#document-fragment`) and never match an element.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Selector {
    text: String,
    tag: Option<String>,
    classes: Vec<String>,
}

impl Selector {
    /// Describes `node` by its lowercased tag name and, when `with_classes`
    /// is set, its class names in class-list order.
    pub fn for_node<T>(tree: &T, node: T::Node, with_classes: bool) -> Self
    where
        T: DomTree + ?Sized,
    {
        let Some(tag) = tree.tag_name(node) else {
            return Self::node_name(tree.node_name(node));
        };

        let mut text = tag.to_lowercase();
        if with_classes {
            for class in tree.class_list(node) {
                text.push('.');
                text.push_str(&escape_class(class));
            }
        }
        Self::parse(&text)
    }

    pub fn node_name(name: impl Into<String>) -> Self {
        Self { text: name.into(), tag: None, classes: Vec::new() }
    }

    /// Parses the textual form. A backslash escapes the following character;
    /// every unescaped `.` starts a new class name.
    pub fn parse(text: &str) -> Self {
        if text.is_empty() || text.starts_with('#') {
            return Self::node_name(text);
        }

        let mut segments = Vec::new();
        let mut current = String::new();
        let mut chars = text.chars();
        while let Some(ch) = chars.next() {
            match ch {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        current.push(escaped);
                    }
                }
                '.' => segments.push(std::mem::take(&mut current)),
                _ => current.push(ch),
            }
        }
        segments.push(current);

        let mut segments = segments.into_iter();
        let tag = segments.next().filter(|tag| !tag.is_empty());
        Self { text: text.to_owned(), tag, classes: segments.collect() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Whether `node` is an element this selector applies to.
    pub fn matches<T>(&self, tree: &T, node: T::Node) -> bool
    where
        T: DomTree + ?Sized,
    {
        let Some(tag) = self.tag.as_deref() else {
            return false;
        };
        if tree.kind(node) != NodeKind::Element {
            return false;
        }
        let Some(node_tag) = tree.tag_name(node) else {
            return false;
        };
        if !node_tag.eq_ignore_ascii_case(tag) {
            return false;
        }
        self.classes.iter().all(|class| tree.class_list(node).any(|candidate| candidate == class))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for Selector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

/// Escapes `{` and `}` in a class name with a backslash.
pub fn escape_class(class: &str) -> Cow<'_, str> {
    if !class.contains(['{', '}']) {
        return Cow::Borrowed(class);
    }
    let mut escaped = String::with_capacity(class.len() + 2);
    for ch in class.chars() {
        if matches!(ch, '{' | '}') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    Cow::Owned(escaped)
}
