/// Parsing for inline code spans (`code`)

/// Try to parse a code span starting at the current position.
/// Returns (total_len, content) if a closing backtick run of the same length
/// is found. Newlines inside the span become spaces, and one leading plus one
/// trailing space are stripped when the content has both and is not all
/// spaces.
pub fn try_parse_code_span(text: &str) -> Option<(usize, String)> {
    let opening_backticks = text.bytes().take_while(|&b| b == b'`').count();
    if opening_backticks == 0 {
        return None;
    }

    let rest = &text[opening_backticks..];

    let mut pos = 0;
    while pos < rest.len() {
        if rest[pos..].starts_with('`') {
            let closing_backticks = rest[pos..].bytes().take_while(|&b| b == b'`').count();

            if closing_backticks == opening_backticks {
                let total_len = opening_backticks + pos + closing_backticks;
                return Some((total_len, normalize_content(&rest[..pos])));
            }

            // Skip over this backtick run, it has the wrong length
            pos += closing_backticks;
        } else {
            // Advance by character to stay on UTF-8 boundaries
            let ch_len = rest[pos..].chars().next()?.len_utf8();
            pos += ch_len;
        }
    }

    // No matching closing backticks found
    None
}

fn normalize_content(raw: &str) -> String {
    let content = raw.replace('\n', " ");

    let stripped = content.strip_prefix(' ').and_then(|s| s.strip_suffix(' '));
    match stripped {
        Some(inner) if inner.bytes().any(|b| b != b' ') => inner.to_string(),
        _ => content,
    }
}
