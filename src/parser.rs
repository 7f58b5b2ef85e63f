//! Parser module containing the block and inline passes.

use crate::ast::Document;

pub(crate) mod block_parser;
mod inline_parser;
mod task_postprocessor;

/// Parses a BFM document string into a decorated AST.
///
/// This function normalizes line endings, runs the block parser (which
/// parses paragraph and heading interiors inline as they close), and
/// applies the post-parse task decoration pass.
///
/// # Examples
///
/// ```rust
/// use bfm::parser::parse;
///
/// let document = parse("# Plans\n\n- [x] ship it");
/// assert_eq!(document.children.len(), 2);
/// ```
pub fn parse(input: &str) -> Document {
    #[cfg(debug_assertions)]
    {
        crate::init_logger();
    }

    let normalized = input.replace("\r\n", "\n");
    let children = block_parser::BlockParser::new(&normalized).parse();
    task_postprocessor::decorate_tasks(Document { children })
}
