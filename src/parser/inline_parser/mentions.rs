/// Parsing for @-mentions
///
/// The identifier pattern is `[a-zA-Z][a-zA-Z0-9._-]*` with trailing `.`,
/// `_`, or `-` stripped so sentence punctuation stays outside the mention.
/// The `@` must not be preceded by an alphanumeric character; the caller
/// enforces that.

/// Try to parse a mention at the start of the given text.
/// Returns (total_len, identifier), where total_len covers the `@` plus the
/// stripped identifier. Stripped trailing punctuation is not consumed.
pub fn try_parse_mention(text: &str) -> Option<(usize, &str)> {
    let bytes = text.as_bytes();

    if bytes.len() < 2 || bytes[0] != b'@' || !bytes[1].is_ascii_alphabetic() {
        return None;
    }

    let mut end = 2;
    while end < bytes.len() && is_identifier_byte(bytes[end]) {
        end += 1;
    }

    while end > 2 && matches!(bytes[end - 1], b'.' | b'_' | b'-') {
        end -= 1;
    }

    Some((end, &text[1..end]))
}

fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'.' || b == b'_' || b == b'-'
}
