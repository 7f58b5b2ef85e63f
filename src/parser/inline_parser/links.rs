//! Parsing for links, images, and automatic links.
//!
//! Implements:
//! - Automatic links: `<https://example.com>`
//! - Inline links: `[text](url)` and `[text](url "title")`
//! - Inline images: `![alt](url)` and `![alt](url "title")`

/// Try to parse an inline link starting at the current position.
///
/// Inline links have the form `[text](url)` or `[text](url "title")`.
/// Returns Some((length, text_content, dest_content)) if a valid link is found.
pub fn try_parse_inline_link(text: &str) -> Option<(usize, &str, &str)> {
    if !text.starts_with('[') {
        return None;
    }

    let close_bracket = find_closing_bracket(&text[1..])? + 1;
    let link_text = &text[1..close_bracket];

    // Check for immediate ( after ]
    let after_bracket = close_bracket + 1;
    if text.len() <= after_bracket || !text[after_bracket..].starts_with('(') {
        return None;
    }

    let dest_start = after_bracket + 1;
    let close_paren = find_closing_paren(&text[dest_start..])?;
    let dest_content = &text[dest_start..dest_start + close_paren];

    // Total length: [ + text + ] + ( + dest + )
    let total_len = dest_start + close_paren + 1;

    Some((total_len, link_text, dest_content))
}

/// Try to parse an inline image starting at the current position.
///
/// Inline images have the form `![alt](url)` or `![alt](url "title")`.
/// Returns Some((length, alt_text, dest_content)) if a valid image is found.
pub fn try_parse_inline_image(text: &str) -> Option<(usize, &str, &str)> {
    let rest = text.strip_prefix('!')?;
    let (inner_len, alt_text, dest_content) = try_parse_inline_link(rest)?;

    Some((inner_len + 1, alt_text, dest_content))
}

/// Try to parse an automatic link starting at the current position.
///
/// Automatic links have the form `<https://example.com>`. Only http and
/// https URLs are recognized.
/// Returns Some((length, url_content)) if a valid automatic link is found.
pub fn try_parse_autolink(text: &str) -> Option<(usize, &str)> {
    if !text.starts_with('<') {
        return None;
    }

    let close_pos = text[1..].find('>')?;
    let content = &text[1..1 + close_pos];

    if content.contains(|c: char| c.is_whitespace()) {
        return None;
    }

    if !content.starts_with("http://") && !content.starts_with("https://") {
        return None;
    }

    // Total length includes < and >
    Some((close_pos + 2, content))
}

/// Split a raw link destination into the URL and an optional quoted title.
///
/// `url "title"` and `url 'title'` forms are recognized; the URL may also be
/// wrapped in angle brackets. A destination with no quoted remainder is all
/// URL, and an empty title counts as no title.
pub fn split_destination(dest: &str) -> (String, Option<String>) {
    let dest = dest.trim();

    let (url, rest) = if let Some(inner) = dest.strip_prefix('<') {
        match inner.find('>') {
            Some(end) => (&inner[..end], &inner[end + 1..]),
            None => (dest, ""),
        }
    } else {
        match dest.find(|c: char| c.is_whitespace()) {
            Some(end) => (&dest[..end], &dest[end..]),
            None => (dest, ""),
        }
    };

    (url.to_string(), parse_title(rest.trim()))
}

fn parse_title(rest: &str) -> Option<String> {
    for quote in ['"', '\''] {
        if let Some(body) = rest
            .strip_prefix(quote)
            .and_then(|s| s.strip_suffix(quote))
        {
            let escaped = format!("\\{}", quote);
            let title = body.replace(&escaped, &quote.to_string());
            if title.is_empty() {
                return None;
            }
            return Some(title);
        }
    }

    None
}

/// Find the offset of the `]` closing the bracket pair opened just before
/// this text. Nested brackets and backslash escapes are respected.
fn find_closing_bracket(text: &str) -> Option<usize> {
    let mut bracket_depth = 0;
    let mut escape_next = false;

    for (i, ch) in text.char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' => escape_next = true,
            '[' => bracket_depth += 1,
            ']' => {
                if bracket_depth == 0 {
                    return Some(i);
                }
                bracket_depth -= 1;
            }
            _ => {}
        }
    }

    None
}

/// Find the offset of the `)` closing the destination. Balanced inner parens
/// are allowed and quoted sections may contain anything.
fn find_closing_paren(text: &str) -> Option<usize> {
    let mut paren_depth = 0;
    let mut escape_next = false;
    let mut in_quotes = false;

    for (i, ch) in text.char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' => escape_next = true,
            '"' => in_quotes = !in_quotes,
            '(' if !in_quotes => paren_depth += 1,
            ')' if !in_quotes => {
                if paren_depth == 0 {
                    return Some(i);
                }
                paren_depth -= 1;
            }
            _ => {}
        }
    }

    None
}
