//! Indented code block parsing utilities.
//!
//! A block of text indented four columns (a tab counts to the next tab
//! stop) is treated as verbatim text. The initial four columns are not
//! part of the verbatim text and are removed in the output.

use crate::parser::block_parser::utils::{indent_width, is_blank};

/// Check if a non-blank line is indented enough to be part of an
/// indented code block.
pub(crate) fn is_indented_code_line(text: &str) -> bool {
    !is_blank(text) && indent_width(text) >= 4
}
