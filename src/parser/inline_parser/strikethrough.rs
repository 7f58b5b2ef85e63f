/// Parsing for strikethrough (~~text~~)
///
/// Only double-tilde delimiters count. The opener must not be followed by
/// whitespace and the closer must not be preceded by it; nested inline
/// elements are handled by recursive parsing of the inner content.

/// Try to parse strikethrough starting at the current position.
/// Returns (total_len, inner_text) if a valid closing `~~` is found.
pub fn try_parse_strikethrough(text: &str) -> Option<(usize, &str)> {
    let bytes = text.as_bytes();

    if bytes.len() < 5 || bytes[0] != b'~' || bytes[1] != b'~' {
        return None;
    }
    // A longer tilde run is not a strikethrough opener
    if bytes[2] == b'~' {
        return None;
    }

    let after_open = text[2..].chars().next()?;
    if after_open.is_whitespace() {
        return None;
    }

    let mut pos = 2;
    while pos + 1 < bytes.len() {
        if bytes[pos] == b'~' && bytes[pos + 1] == b'~' {
            let run_len = bytes[pos..].iter().take_while(|&&b| b == b'~').count();
            let before = text[..pos].chars().last()?;

            if run_len == 2 && !before.is_whitespace() {
                return Some((pos + 2, &text[2..pos]));
            }

            pos += run_len;
        } else {
            let ch_len = text[pos..].chars().next()?.len_utf8();
            pos += ch_len;
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_strikethrough() {
        let result = try_parse_strikethrough("~~done~~");
        assert_eq!(result, Some((8, "done")));
    }

    #[test]
    fn test_strikethrough_with_trailing_text() {
        let result = try_parse_strikethrough("~~old~~ new");
        assert_eq!(result, Some((7, "old")));
    }

    #[test]
    fn test_unclosed() {
        assert_eq!(try_parse_strikethrough("~~oops"), None);
    }

    #[test]
    fn test_single_tilde_rejected() {
        assert_eq!(try_parse_strikethrough("~oops~"), None);
    }

    #[test]
    fn test_triple_tilde_rejected() {
        assert_eq!(try_parse_strikethrough("~~~oops~~~"), None);
    }

    #[test]
    fn test_whitespace_after_opener_rejected() {
        assert_eq!(try_parse_strikethrough("~~ nope~~"), None);
    }

    #[test]
    fn test_whitespace_before_closer_skipped() {
        // The first `~~` is preceded by a space, the second one closes
        let result = try_parse_strikethrough("~~a ~~b~~");
        assert_eq!(result, Some((9, "a ~~b")));
    }

    #[test]
    fn test_inner_markup_kept() {
        let result = try_parse_strikethrough("~~a *b*~~ c");
        assert_eq!(result, Some((9, "a *b*")));
    }
}
