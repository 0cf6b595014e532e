use crate::chain::QueryChain;
use crate::path::find_path;
use crate::render::{find_by_js, render_expression};
use crate::resolve::{ResolveError, resolve_path};
use shadowpath_core::DomTree;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocateError {
    #[error("no target element given")]
    MissingTarget,
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Resolved lookup for one element: the typed chain and its rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Locator {
    chain: QueryChain,
    expression: String,
}

impl Locator {
    pub fn new(chain: QueryChain) -> Self {
        let expression = render_expression(&chain);
        Self { chain, expression }
    }

    pub fn chain(&self) -> &QueryChain {
        &self.chain
    }

    /// JavaScript expression evaluating to the element.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The `@FindByJS(script = return ...)` annotation for this lookup.
    pub fn find_by_js(&self) -> String {
        find_by_js(&self.expression)
    }

    pub fn crosses_shadow_boundary(&self) -> bool {
        self.chain.crosses_shadow_boundary()
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.find_by_js())
    }
}

/// Finds the shadow path of `target` and resolves it against `tree`.
pub fn locate<T>(tree: &T, target: Option<T::Node>) -> Result<Locator, LocateError>
where
    T: DomTree + ?Sized,
{
    let path = find_path(tree, target).ok_or(LocateError::MissingTarget)?;
    let chain = resolve_path(tree, &path)?;
    Ok(Locator::new(chain))
}

/// Convenience wrapper returning the `@FindByJS` annotation directly.
pub fn locate_find_by_js<T>(tree: &T, target: Option<T::Node>) -> Result<String, LocateError>
where
    T: DomTree + ?Sized,
{
    locate(tree, target).map(|locator| locator.find_by_js())
}
