/// Parsing for hashtags
///
/// The identifier pattern is `[a-zA-Z][a-zA-Z0-9_-]*` with trailing `_` or
/// `-` stripped. Unlike mentions, `.` never belongs to a hashtag. The `#`
/// must not be preceded by an alphanumeric character; the caller enforces
/// that, which also keeps ATX headings from ever reaching this parser.

/// Try to parse a hashtag at the start of the given text.
/// Returns (total_len, identifier) without the leading `#` in the identifier.
pub fn try_parse_hashtag(text: &str) -> Option<(usize, &str)> {
    let bytes = text.as_bytes();

    if bytes.len() < 2 || bytes[0] != b'#' || !bytes[1].is_ascii_alphabetic() {
        return None;
    }

    let mut end = 2;
    while end < bytes.len() && is_identifier_byte(bytes[end]) {
        end += 1;
    }

    while end > 2 && matches!(bytes[end - 1], b'_' | b'-') {
        end -= 1;
    }

    Some((end, &text[1..end]))
}

fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}
