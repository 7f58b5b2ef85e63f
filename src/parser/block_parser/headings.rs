//! ATX heading parsing utilities.

use crate::parser::block_parser::utils::indent_width;

/// Try to parse an ATX heading from content, returns heading level (1-6) if found.
pub(crate) fn try_parse_atx_heading(content: &str) -> Option<usize> {
    if indent_width(content) >= 4 {
        return None;
    }
    let trimmed = content.trim_start();

    // Must start with 1-6 # characters
    let hash_count = trimmed.chars().take_while(|&c| c == '#').count();
    if hash_count == 0 || hash_count > 6 {
        return None;
    }

    // After hashes, must be end of line, space, or tab
    let after_hashes = &trimmed[hash_count..];
    if !after_hashes.is_empty() && !after_hashes.starts_with(' ') && !after_hashes.starts_with('\t')
    {
        return None;
    }

    Some(hash_count)
}

/// Extract the heading text: content after the marker, with an optional
/// closing hash sequence removed. A closing sequence only counts when it
/// is preceded by whitespace or makes up the entire text.
pub(crate) fn heading_text(content: &str, level: usize) -> &str {
    let trimmed = content.trim_start();
    let after_marker = trimmed[level..].trim_start_matches([' ', '\t']);
    let text = after_marker.trim_end();

    let without_hashes = text.trim_end_matches('#');
    if without_hashes.len() != text.len() {
        if without_hashes.is_empty() {
            return "";
        }
        if without_hashes.ends_with(' ') || without_hashes.ends_with('\t') {
            return without_hashes.trim_end();
        }
    }

    text
}
