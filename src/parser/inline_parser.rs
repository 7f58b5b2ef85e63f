//! Inline parsing: a single left-to-right scan over paragraph text.
//!
//! Each construct lives in its own submodule with a pure `try_parse_*`
//! recognizer. The scan dispatches on the byte at the current position,
//! hands the remainder to the matching recognizer, and falls back to plain
//! text when nothing matches. Nested content (emphasis, link text) is
//! parsed recursively.

use crate::ast::Inline;

mod autolinks;
mod code_spans;
mod emphasis;
mod escapes;
mod hashtags;
mod links;
mod mentions;
mod strikethrough;
mod task_markers;
mod task_modifiers;

use autolinks::try_parse_bare_url;
use code_spans::try_parse_code_span;
use emphasis::try_parse_emphasis;
use escapes::try_parse_escape;
use hashtags::try_parse_hashtag;
use links::{split_destination, try_parse_autolink, try_parse_inline_image, try_parse_inline_link};
use mentions::try_parse_mention;
use strikethrough::try_parse_strikethrough;
use task_markers::try_parse_task_marker;
use task_modifiers::try_parse_task_modifier;

/// Parse inline elements from text content.
///
/// `task_candidate` is true only for the first paragraph of a list item;
/// there a task marker is recognized at position zero and nowhere else.
pub fn parse_inline_text(text: &str, task_candidate: bool) -> Vec<Inline> {
    log::trace!("inline text ({} bytes): {:?}", text.len(), text);

    let mut inlines: Vec<Inline> = Vec::new();
    let bytes = text.as_bytes();
    let mut pos = 0;
    let mut text_start = 0;

    if task_candidate && let Some((len, state)) = try_parse_task_marker(text) {
        log::debug!("Matched task marker: {:?}", state);
        inlines.push(Inline::TaskMarker(state));
        pos = len;
        text_start = len;
    }

    while pos < text.len() {
        // Hard break: backslash before the line ending
        if bytes[pos] == b'\\' && pos + 1 < text.len() && bytes[pos + 1] == b'\n' {
            push_text(&mut inlines, &text[text_start..pos]);
            inlines.push(Inline::HardBreak);
            pos += 2;
            text_start = pos;
            continue;
        }

        // Backslash escape
        if bytes[pos] == b'\\'
            && let Some((len, ch)) = try_parse_escape(&text[pos..])
        {
            push_text(&mut inlines, &text[text_start..pos]);
            push_char(&mut inlines, ch);
            pos += len;
            text_start = pos;
            continue;
        }

        // Line ending: hard break after two trailing spaces, soft otherwise
        if bytes[pos] == b'\n' {
            let pending = &text[text_start..pos];
            let trimmed = pending.trim_end_matches(' ');
            push_text(&mut inlines, trimmed);
            if pending.len() - trimmed.len() >= 2 {
                inlines.push(Inline::HardBreak);
            } else {
                inlines.push(Inline::SoftBreak);
            }
            pos += 1;
            text_start = pos;
            continue;
        }

        // Code span
        if bytes[pos] == b'`' {
            if let Some((len, content)) = try_parse_code_span(&text[pos..]) {
                log::debug!("Matched code span at pos {}", pos);
                push_text(&mut inlines, &text[text_start..pos]);
                inlines.push(Inline::Code(content));
                pos += len;
                text_start = pos;
            } else {
                // Skip the whole unmatched backtick run
                let run = text[pos..].bytes().take_while(|&b| b == b'`').count();
                pos += run;
            }
            continue;
        }

        // Emphasis and strong; an intraword underscore never opens
        if (bytes[pos] == b'*' || bytes[pos] == b'_')
            && !(bytes[pos] == b'_' && prev_is_alphanumeric(text, pos))
            && let Some((len, inner, level, _)) = try_parse_emphasis(&text[pos..])
        {
            log::debug!("Matched emphasis at pos {}: level={}", pos, level);
            push_text(&mut inlines, &text[text_start..pos]);
            let children = parse_inline_text(inner, false);
            inlines.push(match level {
                1 => Inline::Emphasis(children),
                2 => Inline::Strong(children),
                _ => Inline::Strong(vec![Inline::Emphasis(children)]),
            });
            pos += len;
            text_start = pos;
            continue;
        }

        // Strikethrough
        if bytes[pos] == b'~'
            && let Some((len, inner)) = try_parse_strikethrough(&text[pos..])
        {
            log::debug!("Matched strikethrough at pos {}", pos);
            push_text(&mut inlines, &text[text_start..pos]);
            inlines.push(Inline::Strikethrough(parse_inline_text(inner, false)));
            pos += len;
            text_start = pos;
            continue;
        }

        // Inline image (before links, it starts with `![`)
        if bytes[pos] == b'!'
            && let Some((len, alt, dest)) = try_parse_inline_image(&text[pos..])
        {
            log::debug!("Matched image at pos {}: dest={}", pos, dest);
            push_text(&mut inlines, &text[text_start..pos]);
            let (url, title) = split_destination(dest);
            let alt = plain_text(&parse_inline_text(alt, false));
            inlines.push(Inline::Image { url, title, alt });
            pos += len;
            text_start = pos;
            continue;
        }

        // Inline link
        if bytes[pos] == b'['
            && let Some((len, link_text, dest)) = try_parse_inline_link(&text[pos..])
        {
            log::debug!("Matched link at pos {}: dest={}", pos, dest);
            push_text(&mut inlines, &text[text_start..pos]);
            let (url, title) = split_destination(dest);
            let children = parse_inline_text(link_text, false);
            inlines.push(Inline::Link {
                url,
                title,
                children,
            });
            pos += len;
            text_start = pos;
            continue;
        }

        // Automatic link in angle brackets
        if bytes[pos] == b'<'
            && let Some((len, url)) = try_parse_autolink(&text[pos..])
        {
            log::debug!("Matched autolink at pos {}: {}", pos, url);
            push_text(&mut inlines, &text[text_start..pos]);
            inlines.push(Inline::Link {
                url: url.to_string(),
                title: None,
                children: vec![Inline::Text(url.to_string())],
            });
            pos += len;
            text_start = pos;
            continue;
        }

        // Mention
        if bytes[pos] == b'@'
            && !prev_is_alphanumeric(text, pos)
            && let Some((len, identifier)) = try_parse_mention(&text[pos..])
        {
            log::debug!("Matched mention at pos {}: @{}", pos, identifier);
            push_text(&mut inlines, &text[text_start..pos]);
            inlines.push(Inline::Mention {
                identifier: identifier.to_string(),
            });
            pos += len;
            text_start = pos;
            continue;
        }

        // Hashtag
        if bytes[pos] == b'#'
            && !prev_is_alphanumeric(text, pos)
            && let Some((len, identifier)) = try_parse_hashtag(&text[pos..])
        {
            log::debug!("Matched hashtag at pos {}: #{}", pos, identifier);
            push_text(&mut inlines, &text[text_start..pos]);
            inlines.push(Inline::Hashtag {
                identifier: identifier.to_string(),
            });
            pos += len;
            text_start = pos;
            continue;
        }

        // Task modifier, only after a space or tab or at the very start
        if bytes[pos] == b'/'
            && prev_allows_modifier(text, pos)
            && let Some((len, key, value)) = try_parse_task_modifier(&text[pos..])
        {
            log::debug!("Matched task modifier at pos {}: //{}", pos, key);
            push_text(&mut inlines, &text[text_start..pos]);
            inlines.push(Inline::TaskModifier {
                key: key.to_string(),
                value,
            });
            pos += len;
            text_start = pos;
            continue;
        }

        // Bare URL
        if bytes[pos] == b'h'
            && !prev_is_alphanumeric(text, pos)
            && let Some((len, url)) = try_parse_bare_url(&text[pos..])
        {
            log::debug!("Matched bare URL at pos {}: {}", pos, url);
            push_text(&mut inlines, &text[text_start..pos]);
            inlines.push(Inline::Link {
                url: url.to_string(),
                title: None,
                children: vec![Inline::Text(url.to_string())],
            });
            pos += len;
            text_start = pos;
            continue;
        }

        // Nothing matched here, skip ahead to the next candidate position
        pos += find_next_inline_start(&text[pos..]);
    }

    push_text(&mut inlines, &text[text_start..]);

    inlines
}

/// Find the next position where an inline element might start.
/// Returns at least 1 so the scan always makes progress.
fn find_next_inline_start(text: &str) -> usize {
    for (i, ch) in text.char_indices() {
        match ch {
            '\\' | '\n' | '`' | '*' | '_' | '~' | '!' | '[' | '<' | '@' | '#' | '/' | 'h' => {
                return i.max(1);
            }
            _ => {}
        }
    }
    text.len().max(1)
}

fn prev_is_alphanumeric(text: &str, pos: usize) -> bool {
    text[..pos]
        .chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_alphanumeric())
}

fn prev_allows_modifier(text: &str, pos: usize) -> bool {
    match text[..pos].chars().next_back() {
        None => true,
        Some(c) => c == ' ' || c == '\t',
    }
}

/// Append a text chunk, merging into a trailing Text node when present.
fn push_text(inlines: &mut Vec<Inline>, chunk: &str) {
    if chunk.is_empty() {
        return;
    }
    if let Some(Inline::Text(existing)) = inlines.last_mut() {
        existing.push_str(chunk);
    } else {
        inlines.push(Inline::Text(chunk.to_string()));
    }
}

fn push_char(inlines: &mut Vec<Inline>, ch: char) {
    let mut buf = [0u8; 4];
    push_text(inlines, ch.encode_utf8(&mut buf));
}

/// Flatten inline content to plain text, used for image alt text.
pub fn plain_text(inlines: &[Inline]) -> String {
    let mut out = String::new();
    collect_plain_text(inlines, &mut out);
    out
}

fn collect_plain_text(inlines: &[Inline], out: &mut String) {
    for inline in inlines {
        match inline {
            Inline::Text(s) | Inline::Code(s) => out.push_str(s),
            Inline::Emphasis(children)
            | Inline::Strong(children)
            | Inline::Strikethrough(children) => collect_plain_text(children, out),
            Inline::Link { children, .. } => collect_plain_text(children, out),
            Inline::Image { alt, .. } => out.push_str(alt),
            Inline::SoftBreak | Inline::HardBreak => out.push(' '),
            Inline::Mention { identifier } => {
                out.push('@');
                out.push_str(identifier);
            }
            Inline::Hashtag { identifier } => {
                out.push('#');
                out.push_str(identifier);
            }
            Inline::TaskMarker(_) | Inline::TaskModifier { .. } => {}
        }
    }
}
