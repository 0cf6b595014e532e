//! Locating elements behind shadow roots.
//!
//! [`find_path`] records the chain of shadow hosts above a target,
//! [`resolve_path`] turns it into a [`QueryChain`] that reaches the same
//! element again and [`render_expression`] prints that chain as the
//! JavaScript expected by a `@FindByJS` locator.

mod chain;
mod dictionary;
mod locate;
mod path;
mod render;
mod resolve;

pub use chain::{EvaluateError, QueryChain, QueryStep};
pub use dictionary::{
    DEFAULT_OUTPUT_DIR, DictionaryError, LocatorDictionary, OUTPUT_DIR_ENV, RECORD_ENV,
    RecorderConfig, sanitize_file_name,
};
pub use locate::{LocateError, Locator, locate, locate_find_by_js};
pub use path::{EntryRole, PathEntry, ShadowPath, find_path};
pub use render::{DOCUMENT_EXPRESSION, find_by_js, render_expression};
pub use resolve::{ResolveError, resolve_path};
