use serde::Serialize;
use shadowpath_core::{DomTree, Selector, query_selector, query_selector_all};
use thiserror::Error;

/// One step of a lookup starting at the document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "kebab-case")]
pub enum QueryStep {
    /// First descendant of the current scope matching the selector.
    DescendUnique { selector: Selector },
    /// Match at `index` among all descendants matching the selector.
    DescendIndexed { selector: Selector, index: usize },
    /// Continue inside the shadow tree of the current element.
    EnterNestedScope,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluateError {
    #[error("step {position}: nothing matches '{selector}'")]
    NoMatch { position: usize, selector: String },
    #[error("step {position}: index {index} out of range for '{selector}' ({count} matches)")]
    IndexOutOfRange { position: usize, selector: String, index: usize, count: usize },
    #[error("step {position}: element has no shadow root")]
    NoShadowRoot { position: usize },
}

/// Typed lookup expression, evaluated directly against a tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QueryChain {
    steps: Vec<QueryStep>,
}

impl QueryChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: QueryStep) {
        self.steps.push(step);
    }

    pub fn steps(&self) -> &[QueryStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of shadow trees entered on the way to the target.
    pub fn boundary_count(&self) -> usize {
        self.steps.iter().filter(|step| matches!(step, QueryStep::EnterNestedScope)).count()
    }

    pub fn crosses_shadow_boundary(&self) -> bool {
        self.boundary_count() > 0
    }

    /// Runs the chain from the document and returns the node it ends at.
    pub fn evaluate<T>(&self, tree: &T) -> Result<T::Node, EvaluateError>
    where
        T: DomTree + ?Sized,
    {
        let mut scope = tree.document();
        for (position, step) in self.steps.iter().enumerate() {
            scope = match step {
                QueryStep::DescendUnique { selector } => query_selector(tree, scope, selector)
                    .ok_or_else(|| EvaluateError::NoMatch {
                        position,
                        selector: selector.to_string(),
                    })?,
                QueryStep::DescendIndexed { selector, index } => {
                    let matches = query_selector_all(tree, scope, selector);
                    matches.get(*index).copied().ok_or_else(|| EvaluateError::IndexOutOfRange {
                        position,
                        selector: selector.to_string(),
                        index: *index,
                        count: matches.len(),
                    })?
                }
                QueryStep::EnterNestedScope => {
                    tree.shadow_root(scope).ok_or(EvaluateError::NoShadowRoot { position })?
                }
            };
        }
        Ok(scope)
    }
}

impl FromIterator<QueryStep> for QueryChain {
    fn from_iter<I: IntoIterator<Item = QueryStep>>(iter: I) -> Self {
        Self { steps: iter.into_iter().collect() }
    }
}
