/// Parsing for backslash escape sequences
///
/// Any ASCII punctuation character preceded by a backslash is treated
/// literally. A backslash before anything else stays a literal backslash.
/// Backslash-newline is a hard line break and is handled by the caller
/// before escapes are tried.

/// Try to parse a backslash escape sequence starting at the current position.
/// Returns (total_len, escaped_char) or None if not an escape.
pub fn try_parse_escape(text: &str) -> Option<(usize, char)> {
    if !text.starts_with('\\') {
        return None;
    }

    let next_char = text[1..].chars().next()?;

    if !next_char.is_ascii_punctuation() {
        return None;
    }

    Some((2, next_char))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_asterisk() {
        let result = try_parse_escape(r"\*");
        assert_eq!(result, Some((2, '*')));
    }

    #[test]
    fn test_escape_backtick() {
        let result = try_parse_escape(r"\`");
        assert_eq!(result, Some((2, '`')));
    }

    #[test]
    fn test_escape_bracket() {
        let result = try_parse_escape(r"\[");
        assert_eq!(result, Some((2, '[')));
    }

    #[test]
    fn test_escape_backslash() {
        let result = try_parse_escape(r"\\");
        assert_eq!(result, Some((2, '\\')));
    }

    #[test]
    fn test_not_escape_letter() {
        assert_eq!(try_parse_escape(r"\a"), None);
        assert_eq!(try_parse_escape(r"\5"), None);
    }

    #[test]
    fn test_not_escape_space() {
        assert_eq!(try_parse_escape(r"\ "), None);
    }

    #[test]
    fn test_not_escape_at_end() {
        assert_eq!(try_parse_escape(r"\"), None);
    }

    #[test]
    fn test_escape_all_markdown_punctuation() {
        for ch in r##"`*_{}[]()>#+-.!@/~"##.chars() {
            let input = format!(r"\{}", ch);
            let result = try_parse_escape(&input);
            assert_eq!(result, Some((2, ch)), "should escape '{}'", ch);
        }
    }
}
