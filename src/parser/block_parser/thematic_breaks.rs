//! Thematic break parsing utilities.

use crate::parser::block_parser::utils::indent_width;

/// Check whether a line is a thematic break: three or more of the same
/// marker (`*`, `-`, or `_`), optionally separated by spaces or tabs,
/// indented less than four columns.
pub(crate) fn is_thematic_break(text: &str) -> bool {
    if indent_width(text) >= 4 {
        return false;
    }

    let trimmed = text.trim();
    let mut chars = trimmed.chars();
    let marker = match chars.next() {
        Some(c @ ('*' | '-' | '_')) => c,
        _ => return false,
    };

    let mut count = 1;
    for c in chars {
        if c == marker {
            count += 1;
        } else if c != ' ' && c != '\t' {
            return false;
        }
    }

    count >= 3
}
