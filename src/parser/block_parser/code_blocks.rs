//! Fenced code block parsing utilities.

use crate::parser::block_parser::utils::indent_width;

/// Information about a detected code fence opening.
pub(crate) struct FenceInfo {
    pub fence_char: char,
    pub fence_count: usize,
    pub indent: usize,
    pub info_string: String,
}

/// Try to detect a fenced code block opening from a line.
/// Returns fence info if this is a valid opening fence.
pub(crate) fn try_parse_fence_open(text: &str) -> Option<FenceInfo> {
    let indent = indent_width(text);
    if indent >= 4 {
        return None;
    }
    let trimmed = text.trim_start();

    // Check for fence opening (``` or ~~~)
    let fence_char = match trimmed.chars().next() {
        Some(c @ ('`' | '~')) => c,
        _ => return None,
    };
    let fence_count = trimmed.chars().take_while(|&c| c == fence_char).count();
    if fence_count < 3 {
        return None;
    }

    let info_string = trimmed[fence_count..].trim();

    // Info strings of backtick fences may not contain backticks
    if fence_char == '`' && info_string.contains('`') {
        return None;
    }

    Some(FenceInfo {
        fence_char,
        fence_count,
        indent,
        info_string: info_string.to_string(),
    })
}

/// Check if a line is a valid closing fence for the given fence info.
pub(crate) fn is_closing_fence(text: &str, fence: &FenceInfo) -> bool {
    if indent_width(text) >= 4 {
        return false;
    }
    let trimmed = text.trim_start();

    if !trimmed.starts_with(fence.fence_char) {
        return false;
    }

    let closing_count = trimmed
        .chars()
        .take_while(|&c| c == fence.fence_char)
        .count();

    if closing_count < fence.fence_count {
        return false;
    }

    // Rest of line must be empty
    trimmed[closing_count..].trim().is_empty()
}
