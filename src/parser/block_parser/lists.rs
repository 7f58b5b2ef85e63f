//! List marker parsing utilities.

use crate::parser::block_parser::utils::indent_width;

/// A recognized list marker at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ListMarkerInfo {
    pub ordered: bool,
    /// Starting number of an ordered marker; 1 for bullets.
    pub start: u64,
    /// The bullet character, or the delimiter of an ordered marker
    /// (`.` or `)`). Items only group into one list when this matches.
    pub marker: char,
    /// Columns of indentation before the marker.
    pub indent: usize,
    /// Column at which item content starts. Continuation lines must be
    /// indented at least this far to stay inside the item.
    pub content_column: usize,
    /// Byte offset of the first line's content within the marker line.
    pub content_offset: usize,
    /// False when nothing but whitespace follows the marker.
    pub has_content: bool,
}

impl ListMarkerInfo {
    /// Whether an item with this marker belongs to the same list as one
    /// with `other`'s marker.
    pub fn continues_list(&self, other: &ListMarkerInfo) -> bool {
        self.ordered == other.ordered && self.marker == other.marker
    }
}

/// Try to parse a list marker: a bullet (`-`, `+`, `*`) or an ordered
/// marker (up to nine digits followed by `.` or `)`), indented less than
/// four columns and followed by whitespace or end of line.
pub(crate) fn try_parse_list_marker(line: &str) -> Option<ListMarkerInfo> {
    let indent = indent_width(line);
    if indent >= 4 {
        return None;
    }
    let trimmed = line.trim_start();

    let (ordered, start, marker, marker_width) = match trimmed.chars().next() {
        Some(c @ ('-' | '+' | '*')) => (false, 1, c, 1),
        Some(c) if c.is_ascii_digit() => {
            let digits = trimmed.chars().take_while(char::is_ascii_digit).count();
            if digits > 9 {
                return None;
            }
            let delimiter = match trimmed[digits..].chars().next() {
                Some(d @ ('.' | ')')) => d,
                _ => return None,
            };
            let start = trimmed[..digits].parse::<u64>().ok()?;
            (true, start, delimiter, digits + 1)
        }
        _ => return None,
    };

    // The marker must be followed by whitespace or end the line
    let after = &trimmed[marker_width..];
    if !after.is_empty() && !after.starts_with(' ') && !after.starts_with('\t') {
        return None;
    }

    // Measure the whitespace run after the marker in columns
    let marker_end = indent + marker_width;
    let mut col = marker_end;
    for c in after.chars() {
        match c {
            ' ' => col += 1,
            '\t' => col = col / 4 * 4 + 4,
            _ => break,
        }
    }
    let ws_cols = col - marker_end;

    // An empty item, or one starting with indented code, begins one
    // column past the marker
    let rest = after.trim_start_matches([' ', '\t']);
    let lead_bytes = line.len() - trimmed.len();
    let (content_column, content_offset) = if rest.is_empty() {
        (marker_end + 1, line.len())
    } else if ws_cols > 4 {
        (marker_end + 1, lead_bytes + marker_width + 1)
    } else {
        let ws_bytes = after.len() - rest.len();
        (marker_end + ws_cols, lead_bytes + marker_width + ws_bytes)
    };

    Some(ListMarkerInfo {
        ordered,
        start,
        marker,
        indent,
        content_column,
        content_offset,
        has_content: !rest.is_empty(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullet_marker() {
        let info = try_parse_list_marker("- item").unwrap();
        assert!(!info.ordered);
        assert_eq!(info.marker, '-');
        assert_eq!(info.indent, 0);
        assert_eq!(info.content_column, 2);
        assert_eq!(&"- item"[info.content_offset..], "item");
        assert!(info.has_content);
    }

    #[test]
    fn test_indented_bullet() {
        let info = try_parse_list_marker("  * x").unwrap();
        assert_eq!(info.indent, 2);
        assert_eq!(info.content_column, 4);
    }

    #[test]
    fn test_ordered_marker() {
        let info = try_parse_list_marker("1. alpha").unwrap();
        assert!(info.ordered);
        assert_eq!(info.start, 1);
        assert_eq!(info.marker, '.');
        assert_eq!(info.content_column, 3);
    }

    #[test]
    fn test_ordered_paren_marker() {
        let info = try_parse_list_marker("12) beta").unwrap();
        assert_eq!(info.start, 12);
        assert_eq!(info.marker, ')');
        assert_eq!(info.content_column, 4);
    }

    #[test]
    fn test_ten_digits_rejected() {
        assert!(try_parse_list_marker("1234567890. x").is_none());
    }

    #[test]
    fn test_marker_needs_whitespace() {
        assert!(try_parse_list_marker("-x").is_none());
        assert!(try_parse_list_marker("1.x").is_none());
    }

    #[test]
    fn test_empty_item() {
        let info = try_parse_list_marker("-").unwrap();
        assert_eq!(info.content_column, 2);
        assert_eq!(info.content_offset, 1);
        assert!(!info.has_content);
    }

    #[test]
    fn test_wide_gap_starts_one_past_marker() {
        let info = try_parse_list_marker("-      code").unwrap();
        assert_eq!(info.content_column, 2);
        assert_eq!(&"-      code"[info.content_offset..], "     code");
    }

    #[test]
    fn test_indented_marker_offsets() {
        let info = try_parse_list_marker("  1) x").unwrap();
        assert_eq!(info.content_column, 5);
        assert_eq!(&"  1) x"[info.content_offset..], "x");
    }

    #[test]
    fn test_four_space_indent_rejected() {
        assert!(try_parse_list_marker("    - x").is_none());
    }

    #[test]
    fn test_continues_list() {
        let dash = try_parse_list_marker("- a").unwrap();
        let dash2 = try_parse_list_marker("- b").unwrap();
        let plus = try_parse_list_marker("+ c").unwrap();
        let dot = try_parse_list_marker("2. d").unwrap();
        let paren = try_parse_list_marker("3) e").unwrap();
        assert!(dash.continues_list(&dash2));
        assert!(!dash.continues_list(&plus));
        assert!(!dash.continues_list(&dot));
        assert!(!dot.continues_list(&paren));
    }
}
