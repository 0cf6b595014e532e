//! Rendering of query chains into the JavaScript understood by `@FindByJS`.

use crate::chain::{QueryChain, QueryStep};
use std::fmt::Write;

/// Expression every rendered chain starts from.
pub const DOCUMENT_EXPRESSION: &str = "document";

const FIND_BY_JS_PREFIX: &str = "@FindByJS(script = return ";
const FIND_BY_JS_SUFFIX: &str = ")";

/// Renders `chain` as a chain of `querySelector` calls rooted at `document`.
pub fn render_expression(chain: &QueryChain) -> String {
    let mut expression = String::from(DOCUMENT_EXPRESSION);
    for step in chain.steps() {
        push_step(&mut expression, step);
    }
    expression
}

fn push_step(expression: &mut String, step: &QueryStep) {
    match step {
        QueryStep::DescendUnique { selector } => {
            let _ = write!(expression, ".querySelector('{}')", quote(selector.as_str()));
        }
        QueryStep::DescendIndexed { selector, index } => {
            let _ = write!(expression, ".querySelectorAll('{}')[{index}]", quote(selector.as_str()));
        }
        QueryStep::EnterNestedScope => expression.push_str(".shadowRoot"),
    }
}

/// Escapes a selector for a single-quoted JavaScript string literal.
///
/// Double quotes are left alone; the `@FindByJS` wrapper escapes them.
fn quote(selector: &str) -> String {
    selector.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Wraps a rendered expression into the `@FindByJS` locator annotation.
pub fn find_by_js(expression: &str) -> String {
    format!("{FIND_BY_JS_PREFIX}{}{FIND_BY_JS_SUFFIX}", expression.replace('"', "\\\""))
}
