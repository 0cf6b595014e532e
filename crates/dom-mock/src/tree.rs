use quick_xml::de::from_str;
use serde::Deserialize;
use std::fmt;

/// Declarative description of an element, its light children and its
/// shadow tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeSpec {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    children: Vec<NodeSpec>,
    shadow: Option<Vec<NodeSpec>>,
}

impl NodeSpec {
    pub fn element(tag: impl Into<String>) -> Self {
        Self { tag: tag.into(), id: None, classes: Vec::new(), children: Vec::new(), shadow: None }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classes.extend(classes.into_iter().map(Into::into));
        self
    }

    pub fn with_child(mut self, child: NodeSpec) -> Self {
        self.children.push(child);
        self
    }

    /// Adds `child` to the shadow tree, attaching one if needed.
    pub fn with_shadow_child(mut self, child: NodeSpec) -> Self {
        self.shadow.get_or_insert_with(Vec::new).push(child);
        self
    }

    /// Attaches an empty shadow tree.
    pub fn with_shadow_root(mut self) -> Self {
        self.shadow.get_or_insert_with(Vec::new);
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn children(&self) -> &[NodeSpec] {
        &self.children
    }

    pub fn shadow_children(&self) -> Option<&[NodeSpec]> {
        self.shadow.as_deref()
    }
}

pub(crate) fn parse_document(xml: &str) -> Result<Vec<NodeSpec>, MockDocumentLoadError> {
    let parsed: XmlDocument = from_str(xml).map_err(MockDocumentLoadError::Xml)?;
    parsed.elements.into_iter().map(build_spec).collect()
}

#[derive(Debug, Deserialize)]
struct XmlDocument {
    #[serde(rename = "element", default)]
    elements: Vec<XmlElement>,
}

#[derive(Debug, Deserialize)]
struct XmlElement {
    #[serde(rename = "@tag")]
    tag: Option<String>,
    #[serde(rename = "@id")]
    id: Option<String>,
    #[serde(rename = "@class")]
    class: Option<String>,
    #[serde(rename = "shadow", default)]
    shadow: Vec<XmlShadow>,
    #[serde(rename = "element", default)]
    children: Vec<XmlElement>,
}

#[derive(Debug, Deserialize)]
struct XmlShadow {
    #[serde(rename = "element", default)]
    elements: Vec<XmlElement>,
}

fn build_spec(element: XmlElement) -> Result<NodeSpec, MockDocumentLoadError> {
    let tag = element.tag.filter(|tag| !tag.trim().is_empty()).ok_or_else(|| {
        MockDocumentLoadError::MissingTag(element.id.clone().unwrap_or_default())
    })?;

    let mut spec = NodeSpec::element(tag.trim());
    if let Some(id) = element.id {
        spec = spec.with_id(id);
    }
    if let Some(class) = element.class.as_deref() {
        spec = spec.with_classes(class.split_whitespace());
    }

    let mut shadows = element.shadow.into_iter();
    if let Some(shadow) = shadows.next() {
        if shadows.next().is_some() {
            return Err(MockDocumentLoadError::MultipleShadowRoots(spec.tag));
        }
        spec = spec.with_shadow_root();
        for child in shadow.elements {
            spec = spec.with_shadow_child(build_spec(child)?);
        }
    }

    for child in element.children {
        spec = spec.with_child(build_spec(child)?);
    }
    Ok(spec)
}

#[derive(Debug)]
pub enum MockDocumentLoadError {
    Xml(quick_xml::DeError),
    /// Element without (or with an empty) `tag` attribute; carries its id if any.
    MissingTag(String),
    /// Element declaring more than one `<shadow>` block; carries its tag.
    MultipleShadowRoots(String),
}

impl fmt::Display for MockDocumentLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MockDocumentLoadError::Xml(err) => write!(f, "XML parsing failed: {err}"),
            MockDocumentLoadError::MissingTag(id) if id.is_empty() => {
                write!(f, "element without tag attribute in mock document")
            }
            MockDocumentLoadError::MissingTag(id) => {
                write!(f, "element '{id}' has no tag attribute")
            }
            MockDocumentLoadError::MultipleShadowRoots(tag) => {
                write!(f, "element <{tag}> declares more than one shadow tree")
            }
        }
    }
}

impl std::error::Error for MockDocumentLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MockDocumentLoadError::Xml(err) => Some(err),
            _ => None,
        }
    }
}

impl From<quick_xml::DeError> for MockDocumentLoadError {
    fn from(err: quick_xml::DeError) -> Self {
        MockDocumentLoadError::Xml(err)
    }
}
