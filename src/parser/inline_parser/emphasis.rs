//! Parsing for emphasis (*italic*, **bold**)
//!
//! Delimiter runs are classified with the CommonMark flanking rules, with
//! the intraword-underscore restriction: underscores inside words do not
//! open or close emphasis. Matching itself is simplified: the opening run
//! is paired with the first closing run of the same character, and nested
//! emphasis is handled by recursive parsing of the inner content.

/// Check if a character is Unicode whitespace
fn is_whitespace(c: char) -> bool {
    c.is_whitespace()
}

/// Check if a character is punctuation
fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
}

/// Determine if a delimiter run can open/close emphasis based on flanking rules.
fn analyze_delimiter_run(
    text: &str,
    run_start: usize,
    run_char: char,
    run_count: usize,
) -> (bool, bool) {
    let run_end = run_start + run_count;

    let char_before = if run_start > 0 {
        text[..run_start].chars().last()
    } else {
        None
    };

    let char_after = if run_end < text.len() {
        text[run_end..].chars().next()
    } else {
        None
    };

    let followed_by_whitespace = char_after.is_none_or(is_whitespace);
    let followed_by_punctuation = char_after.is_some_and(is_punctuation);
    let preceded_by_whitespace = char_before.is_none_or(is_whitespace);
    let preceded_by_punctuation = char_before.is_some_and(is_punctuation);

    let left_flanking = !followed_by_whitespace
        && (!followed_by_punctuation || preceded_by_whitespace || preceded_by_punctuation);

    let right_flanking = !preceded_by_whitespace
        && (!preceded_by_punctuation || followed_by_whitespace || followed_by_punctuation);

    if run_char == '_' {
        let preceded_by_alnum = char_before.is_some_and(|c| c.is_alphanumeric());
        let followed_by_alnum = char_after.is_some_and(|c| c.is_alphanumeric());

        let can_open = left_flanking && !preceded_by_alnum;
        let can_close = right_flanking && !followed_by_alnum;
        (can_open, can_close)
    } else {
        let can_open = left_flanking && (!right_flanking || preceded_by_punctuation);
        let can_close = right_flanking && (!left_flanking || followed_by_punctuation);
        (can_open, can_close)
    }
}

/// Try to parse emphasis starting at the given position.
/// Returns (total_bytes_consumed, inner_text, delimiter_level, delimiter_char).
/// Level 1 is emphasis, 2 is strong, 3 is strong wrapping emphasis.
///
/// The first closing run at least as wide as the opener wins; when none
/// exists, the first narrower closer is used and the extra opening
/// delimiters stay inside the span as text.
pub fn try_parse_emphasis(text: &str) -> Option<(usize, &str, u8, char)> {
    let first_char = text.chars().next()?;
    if first_char != '*' && first_char != '_' {
        return None;
    }

    let bytes = text.as_bytes();
    let mut open_count = 0;
    while open_count < bytes.len() && bytes[open_count] == first_char as u8 {
        open_count += 1;
    }

    let (can_open, _) = analyze_delimiter_run(text, 0, first_char, open_count);
    if !can_open {
        return None;
    }

    let wanted = open_count.min(3);
    let mut partial: Option<(usize, usize)> = None;
    let mut search_pos = open_count;

    while search_pos < text.len() {
        let remaining = &text[search_pos..];
        let Some(next_delim) = remaining.find(first_char) else {
            break;
        };
        let close_start = search_pos + next_delim;

        let mut close_count = 0;
        let mut pos = close_start;
        while pos < bytes.len() && bytes[pos] == first_char as u8 {
            close_count += 1;
            pos += 1;
        }

        let (_, can_close) = analyze_delimiter_run(text, close_start, first_char, close_count);

        if can_close {
            if close_count >= wanted {
                return Some(build_match(text, open_count, close_start, close_count));
            }
            if partial.is_none() {
                partial = Some((close_start, close_count));
            }
        }

        // Skip past this delimiter run and continue searching
        search_pos = close_start + close_count;
    }

    let (close_start, close_count) = partial?;
    Some(build_match(text, open_count, close_start, close_count))
}

fn build_match(
    text: &str,
    open_count: usize,
    close_start: usize,
    close_count: usize,
) -> (usize, &str, u8, char) {
    let match_count = open_count.min(close_count).min(3);
    let total_len = close_start + match_count;
    let inner = &text[match_count..close_start];
    let first_char = text.as_bytes()[0] as char;

    (total_len, inner, match_count as u8, first_char)
}
