use shadowpath_dom_mock::{MockDocument, NodeId};
use std::error::Error;
use std::path::Path;

pub type CliResult<T> = Result<T, Box<dyn Error>>;

/// Reads an XML document description from `path`.
pub fn load_document(path: &Path) -> CliResult<MockDocument> {
    let xml = std::fs::read_to_string(path)
        .map_err(|err| format!("failed to read {}: {err}", path.display()))?;
    let document = MockDocument::from_xml(&xml)?;
    tracing::debug!(path = %path.display(), nodes = document.len(), "document loaded");
    Ok(document)
}

pub fn find_target(document: &MockDocument, id: &str) -> CliResult<NodeId> {
    document.element_by_id(id).ok_or_else(|| format!("no element with id '{id}'").into())
}
