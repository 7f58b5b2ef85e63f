//! Blockquote parsing utilities.

/// Check if line starts with a blockquote marker (up to 3 spaces + >).
/// Returns the content after the marker and one optional following space.
pub(crate) fn strip_blockquote_marker(line: &str) -> Option<&str> {
    let bytes = line.as_bytes();
    let mut i = 0;

    // Skip up to 3 spaces
    let mut spaces = 0;
    while i < bytes.len() && bytes[i] == b' ' && spaces < 3 {
        spaces += 1;
        i += 1;
    }

    // Must have > next
    if i >= bytes.len() || bytes[i] != b'>' {
        return None;
    }
    let mut content_start = i + 1;

    // Optional space after >
    if content_start < bytes.len() && bytes[content_start] == b' ' {
        content_start += 1;
    }

    Some(&line[content_start..])
}
