use crate::chain::{QueryChain, QueryStep};
use crate::path::ShadowPath;
use crate::render::render_expression;
use shadowpath_core::{DomTree, query_selector_all};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No element matches a recorded selector below the scope reached so far.
    #[error("Lost my way. No valid paths from {scope}")]
    LostPath { scope: String },
    /// Several elements match but none of them is the recorded node.
    #[error("Could not find way to {selector}")]
    AmbiguityResolution { selector: String },
}

/// Descends from the document along `path` and builds a chain that reaches
/// exactly the recorded nodes.
///
/// A selector matching a single element is used as is. When it matches
/// several, the recorded node's position among them disambiguates.
pub fn resolve_path<T>(tree: &T, path: &ShadowPath<T::Node>) -> Result<QueryChain, ResolveError>
where
    T: DomTree + ?Sized,
{
    let mut chain = QueryChain::new();
    let mut scope = Some(tree.document());
    let last = path.len() - 1;

    for (depth, entry) in path.outer_to_inner().enumerate() {
        let selector = entry.selector();
        let candidates =
            scope.map(|scope| query_selector_all(tree, scope, selector)).unwrap_or_default();

        let reached = match candidates.as_slice() {
            [] => {
                let scope = render_expression(&chain);
                tracing::error!(%scope, "Error: Lost my way. No valid paths from {scope}");
                return Err(ResolveError::LostPath { scope });
            }
            [single] => {
                chain.push(QueryStep::DescendUnique { selector: selector.clone() });
                *single
            }
            _ => {
                let Some(index) = candidates.iter().position(|candidate| *candidate == entry.node())
                else {
                    tracing::error!(%selector, "Error: Could not find way to {selector}");
                    return Err(ResolveError::AmbiguityResolution { selector: selector.to_string() });
                };
                chain.push(QueryStep::DescendIndexed { selector: selector.clone(), index });
                candidates[index]
            }
        };
        tracing::debug!(depth, %selector, candidates = candidates.len(), "path entry resolved");

        if depth < last {
            chain.push(QueryStep::EnterNestedScope);
            scope = tree.shadow_root(reached);
        }
    }

    Ok(chain)
}
