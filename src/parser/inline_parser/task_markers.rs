/// Parsing for bullet-journal task markers
///
/// A task marker is a bracketed state code followed by a mandatory space:
/// `[ ] `, `[x] `, `[>] `, `[<] `, `[-] `, `[o] `, `[!] `.
/// Markers are only meaningful at the very start of a paragraph that sits
/// directly inside a list item; the caller enforces that context.
use crate::ast::TaskState;

/// Try to parse a task marker at the start of the given text.
/// Returns (total_len, state) or None if the text does not open with a marker.
/// The trailing space is part of the marker and is consumed.
pub fn try_parse_task_marker(text: &str) -> Option<(usize, TaskState)> {
    let bytes = text.as_bytes();

    if bytes.len() < 4 || bytes[0] != b'[' || bytes[2] != b']' || bytes[3] != b' ' {
        return None;
    }

    let state = TaskState::from_marker(bytes[1] as char)?;

    Some((4, state))
}
