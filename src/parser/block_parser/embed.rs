//! Parsing for @embed directive blocks.
//!
//! An embed opens with `@embed <url>` where the URL is mandatory and must
//! be http or https. Lines until `@endembed` accumulate verbatim as the
//! caption; the body is never reparsed as markdown.

use super::utils::indent_width;

/// Try to parse an embed opening line, returning the URL.
pub(crate) fn try_parse_embed_open(text: &str) -> Option<&str> {
    if indent_width(text) >= 4 {
        return None;
    }

    let rest = text.trim_start().strip_prefix("@embed")?;

    // Mandatory whitespace between the directive and the URL
    let after_space = rest.trim_start();
    if after_space.len() == rest.len() {
        return None;
    }

    if !after_space.starts_with("http://") && !after_space.starts_with("https://") {
        return None;
    }

    let url = match after_space.find(char::is_whitespace) {
        Some(end) => &after_space[..end],
        None => after_space,
    };

    Some(url)
}

/// True for an embed closing line.
pub(crate) fn is_embed_close(text: &str) -> bool {
    text.trim() == "@endembed"
}
