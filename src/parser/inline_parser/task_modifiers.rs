/// Parsing for task modifiers
///
/// A modifier is `//key` for a boolean flag or `//key:value` for a key-value
/// pair. Keys match `[a-z][a-z0-9]*`. The `//` must be preceded by a space,
/// a tab, or the start of the inline content; the caller enforces that.

/// Try to parse a task modifier at the start of the given text.
/// Returns (total_len, key, value). The value is trimmed of trailing
/// whitespace but the raw (untrimmed) value counts toward total_len.
pub fn try_parse_task_modifier(text: &str) -> Option<(usize, &str, Option<String>)> {
    let bytes = text.as_bytes();

    if bytes.len() < 3 || bytes[0] != b'/' || bytes[1] != b'/' || !bytes[2].is_ascii_lowercase() {
        return None;
    }

    let mut key_end = 3;
    while key_end < bytes.len() && (bytes[key_end].is_ascii_lowercase() || bytes[key_end].is_ascii_digit())
    {
        key_end += 1;
    }
    let key = &text[2..key_end];

    let mut consumed = key_end;
    let mut value = None;

    if key_end < bytes.len() && bytes[key_end] == b':' {
        // A colon with nothing after it is left unconsumed; the modifier
        // degrades to a bare flag.
        if let Some(raw) = match_value(&text[key_end + 1..]) {
            value = Some(raw.trim_end().to_string());
            consumed = key_end + 1 + raw.len();
        }
    }

    Some((consumed, key, value))
}

/// Extract the raw value: everything up to the next ` //key` boundary,
/// or the entire remainder when no boundary follows.
fn match_value(text: &str) -> Option<&str> {
    if text.is_empty() {
        return None;
    }

    let bytes = text.as_bytes();
    for i in 0..bytes.len() {
        if bytes[i] == b' ' && is_modifier_start(&text[i + 1..]) {
            return Some(&text[..i]);
        }
    }

    Some(text)
}

/// True if text begins with `//key` where the key is complete, meaning it is
/// followed by `:`, whitespace, or the end of the text.
fn is_modifier_start(text: &str) -> bool {
    let bytes = text.as_bytes();

    if bytes.len() < 3 || bytes[0] != b'/' || bytes[1] != b'/' || !bytes[2].is_ascii_lowercase() {
        return false;
    }

    let mut i = 3;
    while i < bytes.len() && (bytes[i].is_ascii_lowercase() || bytes[i].is_ascii_digit()) {
        i += 1;
    }

    i == bytes.len() || bytes[i] == b':' || bytes[i].is_ascii_whitespace()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean_flag() {
        let result = try_parse_task_modifier("//done");
        assert_eq!(result, Some((6, "done", None)));
    }

    #[test]
    fn test_key_value() {
        let result = try_parse_task_modifier("//due:2024-01-15");
        assert_eq!(result, Some((16, "due", Some("2024-01-15".to_string()))));
    }

    #[test]
    fn test_value_with_spaces() {
        let result = try_parse_task_modifier("//note:call back tomorrow");
        assert_eq!(
            result,
            Some((25, "note", Some("call back tomorrow".to_string())))
        );
    }

    #[test]
    fn test_value_stops_at_next_modifier() {
        let result = try_parse_task_modifier("//due:friday //assignee:sam");
        assert_eq!(result, Some((12, "due", Some("friday".to_string()))));
    }

    #[test]
    fn test_value_trailing_whitespace_trimmed_but_consumed() {
        let result = try_parse_task_modifier("//due:friday  ");
        assert_eq!(result, Some((14, "due", Some("friday".to_string()))));
    }

    #[test]
    fn test_empty_value_before_next_modifier() {
        // `//a:` directly followed by ` //b` yields an empty value
        let result = try_parse_task_modifier("//a: //b");
        assert_eq!(result, Some((4, "a", Some(String::new()))));
    }

    #[test]
    fn test_trailing_colon_left_unconsumed() {
        // With nothing after the colon the modifier degrades to a flag
        let result = try_parse_task_modifier("//due:");
        assert_eq!(result, Some((5, "due", None)));
    }

    #[test]
    fn test_key_stops_at_invalid_char() {
        let result = try_parse_task_modifier("//dueDate");
        assert_eq!(result, Some((5, "due", None)));
    }

    #[test]
    fn test_key_with_digits() {
        let result = try_parse_task_modifier("//p1");
        assert_eq!(result, Some((4, "p1", None)));
    }

    #[test]
    fn test_invalid_key_start() {
        assert_eq!(try_parse_task_modifier("//2fast"), None);
        assert_eq!(try_parse_task_modifier("//Due"), None);
        assert_eq!(try_parse_task_modifier("//"), None);
    }

    #[test]
    fn test_single_slash_rejected() {
        assert_eq!(try_parse_task_modifier("/due"), None);
    }

    #[test]
    fn test_non_key_double_slash_does_not_end_value() {
        // `//2` cannot start a modifier, so the value keeps going
        let result = try_parse_task_modifier("//path:a //2 b");
        assert_eq!(result, Some((14, "path", Some("a //2 b".to_string()))));
    }

    #[test]
    fn test_incomplete_key_does_not_end_value() {
        // `//b!` is not a complete key boundary
        let result = try_parse_task_modifier("//a:x //b!");
        assert_eq!(result, Some((10, "a", Some("x //b!".to_string()))));
    }

    #[test]
    fn test_value_spans_newline_without_boundary() {
        let result = try_parse_task_modifier("//note:first\nsecond");
        assert_eq!(result, Some((19, "note", Some("first\nsecond".to_string()))));
    }
}
