//! Shared utilities for block parsing.

/// A single source line with its 1-based line number.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Line<'a> {
    pub text: &'a str,
    pub number: usize,
}

/// Split normalized input (LF line endings) into numbered lines.
pub(crate) fn split_lines(input: &str) -> Vec<Line<'_>> {
    input
        .split('\n')
        .enumerate()
        .map(|(i, text)| Line {
            text,
            number: i + 1,
        })
        .collect()
}

/// True when the line contains nothing but whitespace.
pub(crate) fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Indentation width of the line in columns, tabs advancing to the next
/// multiple of 4.
pub(crate) fn indent_width(text: &str) -> usize {
    let mut width = 0;
    for ch in text.chars() {
        match ch {
            ' ' => width += 1,
            '\t' => width = (width / 4 + 1) * 4,
            _ => break,
        }
    }
    width
}

/// Strip up to `cols` columns of leading whitespace. A tab that crosses the
/// target column is consumed whole.
pub(crate) fn strip_indent(text: &str, cols: usize) -> &str {
    let bytes = text.as_bytes();
    let mut width = 0;
    let mut i = 0;

    while i < bytes.len() && width < cols {
        match bytes[i] {
            b' ' => {
                width += 1;
                i += 1;
            }
            b'\t' => {
                width = (width / 4 + 1) * 4;
                i += 1;
            }
            _ => break,
        }
    }

    &text[i..]
}
