//! Parsing for @callout directive blocks.
//!
//! A callout opens with `@callout` followed by optional `key=value`
//! parameters and closes on a line that trims to `@endcallout`. Values may
//! be unquoted (terminated at whitespace) or double-quoted (spaces allowed,
//! `\"` escapes a literal quote). Malformed tokens are skipped, and unknown
//! keys are ignored.

use std::collections::HashMap;

use super::utils::indent_width;

/// Opening-line data for a callout block.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct CalloutOpen {
    pub kind: String,
    pub title: String,
}

/// Try to parse a callout opening line.
pub(crate) fn try_parse_callout_open(text: &str) -> Option<CalloutOpen> {
    if indent_width(text) >= 4 {
        return None;
    }

    let rest = text.trim_start().strip_prefix("@callout")?;

    // Word boundary after the directive name
    if rest
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return None;
    }

    let params = parse_params(rest.trim());
    let kind = params
        .get("type")
        .cloned()
        .unwrap_or_else(|| "info".to_string());
    let title = params.get("title").cloned().unwrap_or_default();

    Some(CalloutOpen { kind, title })
}

/// True for a callout closing line.
pub(crate) fn is_callout_close(text: &str) -> bool {
    text.trim() == "@endcallout"
}

/// Parse a parameter string into a key-value map. Later duplicates win.
fn parse_params(input: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    let bytes = input.as_bytes();
    let mut offset = 0;

    while offset < bytes.len() {
        while offset < bytes.len() && bytes[offset].is_ascii_whitespace() {
            offset += 1;
        }
        if offset >= bytes.len() {
            break;
        }

        let Some((key, value_start)) = match_key(input, offset) else {
            // Not a key=value pair; skip this token
            while offset < bytes.len() && !bytes[offset].is_ascii_whitespace() {
                offset += 1;
            }
            continue;
        };
        offset = value_start;

        if offset < bytes.len() && bytes[offset] == b'"' {
            let (value, after) = read_quoted_value(input, offset + 1);
            params.insert(key.to_string(), value);
            offset = after;
        } else {
            let start = offset;
            while offset < bytes.len() && !bytes[offset].is_ascii_whitespace() {
                offset += 1;
            }
            params.insert(key.to_string(), input[start..offset].to_string());
        }
    }

    params
}

/// Match `key=` at the given offset. Keys are `[a-z][a-z0-9_]*`.
/// Returns the key and the offset just past the `=`.
fn match_key(input: &str, offset: usize) -> Option<(&str, usize)> {
    let bytes = input.as_bytes();

    if !bytes.get(offset)?.is_ascii_lowercase() {
        return None;
    }

    let mut end = offset + 1;
    while end < bytes.len()
        && (bytes[end].is_ascii_lowercase() || bytes[end].is_ascii_digit() || bytes[end] == b'_')
    {
        end += 1;
    }

    if bytes.get(end) == Some(&b'=') {
        Some((&input[offset..end], end + 1))
    } else {
        None
    }
}

/// Read a double-quoted value starting just after the opening quote.
/// An unterminated quote runs to the end of the input.
fn read_quoted_value(input: &str, mut offset: usize) -> (String, usize) {
    let mut value = String::new();

    while offset < input.len() {
        let rest = &input[offset..];
        if rest.starts_with("\\\"") {
            value.push('"');
            offset += 2;
        } else if rest.starts_with('"') {
            offset += 1;
            break;
        } else {
            let Some(ch) = rest.chars().next() else {
                break;
            };
            value.push(ch);
            offset += ch.len_utf8();
        }
    }

    (value, offset)
}
