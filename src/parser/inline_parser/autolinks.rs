/// Parsing for bare URL autolinks
///
/// A bare `http://` or `https://` URL becomes a link without any angle
/// brackets. The URL must not be preceded by an alphanumeric character;
/// the caller enforces that. Trailing sentence punctuation stays outside
/// the URL, and a closing paren is only kept when it balances an opening
/// one inside the URL.

/// Try to parse a bare URL at the start of the given text.
/// Returns (total_len, url).
pub fn try_parse_bare_url(text: &str) -> Option<(usize, &str)> {
    let scheme_len = if text.starts_with("https://") {
        8
    } else if text.starts_with("http://") {
        7
    } else {
        return None;
    };

    let end = text
        .find(|c: char| c.is_whitespace() || c == '<')
        .unwrap_or(text.len());
    let mut url = &text[..end];

    loop {
        let Some(last) = url.chars().last() else {
            return None;
        };
        let strip = match last {
            '.' | ',' | ';' | ':' | '!' | '?' | '"' | '\'' | ']' => true,
            ')' => url.matches(')').count() > url.matches('(').count(),
            _ => false,
        };
        if !strip {
            break;
        }
        url = &url[..url.len() - 1];
    }

    if url.len() <= scheme_len {
        return None;
    }

    Some((url.len(), url))
}
