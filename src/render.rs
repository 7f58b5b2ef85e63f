//! HTML rendering.
//!
//! Every AST variant has exactly one output routine here; adding a node
//! type without teaching the renderer about it is a compile error, not a
//! silently skipped element.

mod html;

pub use html::HtmlRenderer;
