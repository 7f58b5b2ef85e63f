//! Line-oriented block parser.
//!
//! Scans the document as a flat list of lines and dispatches on block
//! start recognizers in priority order: front matter, callout, embed,
//! then the markdown substrate (blockquote, ATX heading, fenced code,
//! thematic break, list, indented code, paragraph). Container interiors
//! are parsed by recursing on a de-indented slice of lines, so every
//! recognizer only ever looks at column zero of its own frame.

use crate::ast::{
    Block, BlockQuote, CalloutBlock, CodeBlock, EmbedBlock, FrontmatterBlock, Heading, List,
    ListItem, Paragraph, ThematicBreak,
};
use crate::parser::inline_parser::parse_inline_text;

mod blockquotes;
mod callout;
mod code_blocks;
mod embed;
mod frontmatter;
mod headings;
mod indented_code;
mod lists;
mod thematic_breaks;
mod utils;

use blockquotes::strip_blockquote_marker;
use callout::{CalloutOpen, is_callout_close, try_parse_callout_open};
use code_blocks::{FenceInfo, is_closing_fence, try_parse_fence_open};
use embed::{is_embed_close, try_parse_embed_open};
use frontmatter::{is_frontmatter_fence, parse_frontmatter_yaml};
use headings::{heading_text, try_parse_atx_heading};
use indented_code::is_indented_code_line;
use lists::{ListMarkerInfo, try_parse_list_marker};
use thematic_breaks::is_thematic_break;
use utils::{Line, indent_width, is_blank, split_lines, strip_indent};

pub(crate) struct BlockParser<'a> {
    lines: Vec<Line<'a>>,
    pos: usize,
    allow_frontmatter: bool,
    in_list_item: bool,
}

impl<'a> BlockParser<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self {
            lines: split_lines(input),
            pos: 0,
            allow_frontmatter: true,
            in_list_item: false,
        }
    }

    fn nested(lines: Vec<Line<'a>>, in_list_item: bool) -> Self {
        Self {
            lines,
            pos: 0,
            allow_frontmatter: false,
            in_list_item,
        }
    }

    pub(crate) fn parse(mut self) -> Vec<Block> {
        let mut blocks = Vec::new();

        while self.pos < self.lines.len() {
            let line = self.lines[self.pos];
            log::trace!("line {}: {:?}", line.number, line.text);

            if is_blank(line.text) {
                self.pos += 1;
                continue;
            }

            if self.allow_frontmatter && blocks.is_empty() && is_frontmatter_fence(line.text) {
                blocks.push(self.parse_frontmatter());
                continue;
            }
            if let Some(open) = try_parse_callout_open(line.text) {
                blocks.push(self.parse_callout(open));
                continue;
            }
            if let Some(url) = try_parse_embed_open(line.text) {
                blocks.push(self.parse_embed(url));
                continue;
            }
            if strip_blockquote_marker(line.text).is_some() {
                blocks.push(self.parse_blockquote());
                continue;
            }
            if let Some(level) = try_parse_atx_heading(line.text) {
                blocks.push(self.parse_heading(level));
                continue;
            }
            if let Some(fence) = try_parse_fence_open(line.text) {
                blocks.push(self.parse_fenced_code(fence));
                continue;
            }
            if is_thematic_break(line.text) {
                blocks.push(Block::ThematicBreak(ThematicBreak { line: line.number }));
                self.pos += 1;
                continue;
            }
            if let Some(marker) = try_parse_list_marker(line.text) {
                blocks.push(self.parse_list(marker));
                continue;
            }
            if is_indented_code_line(line.text) {
                blocks.push(self.parse_indented_code());
                continue;
            }
            let first_block = blocks.is_empty();
            blocks.push(self.parse_paragraph(first_block));
        }

        blocks
    }

    /// Scan forward for the first line satisfying `is_close`. Returns the
    /// index of the closing line, or the slice end when unterminated.
    fn find_close(&self, start: usize, is_close: impl Fn(&str) -> bool) -> (usize, bool) {
        let mut end = start;
        while end < self.lines.len() {
            if is_close(self.lines[end].text) {
                return (end, true);
            }
            end += 1;
        }
        (end, false)
    }

    fn parse_frontmatter(&mut self) -> Block {
        let open_line = self.lines[self.pos];
        let start = self.pos + 1;
        let (end, closed) = self.find_close(start, is_frontmatter_fence);

        let raw_yaml = join_line_texts(&self.lines[start..end]);
        let data = parse_frontmatter_yaml(&raw_yaml);
        log::debug!(
            "front matter at line {} with {} keys",
            open_line.number,
            data.len()
        );

        self.pos = if closed { end + 1 } else { end };
        Block::Frontmatter(FrontmatterBlock {
            raw_yaml,
            data,
            line: open_line.number,
        })
    }

    fn parse_callout(&mut self, open: CalloutOpen) -> Block {
        let open_line = self.lines[self.pos];
        let start = self.pos + 1;
        let (end, closed) = self.find_close(start, is_callout_close);
        log::debug!(
            "callout kind={:?} opened at line {}, closed={}",
            open.kind,
            open_line.number,
            closed
        );

        let children = BlockParser::nested(self.lines[start..end].to_vec(), false).parse();
        self.pos = if closed { end + 1 } else { end };
        Block::Callout(CalloutBlock {
            kind: open.kind,
            title: open.title,
            children,
            line: open_line.number,
        })
    }

    fn parse_embed(&mut self, url: &str) -> Block {
        let open_line = self.lines[self.pos];
        let start = self.pos + 1;
        let (end, closed) = self.find_close(start, is_embed_close);
        log::debug!("embed url={} opened at line {}", url, open_line.number);

        let caption = join_line_texts(&self.lines[start..end]).trim().to_string();
        self.pos = if closed { end + 1 } else { end };
        Block::Embed(EmbedBlock {
            url: url.to_string(),
            caption,
            line: open_line.number,
        })
    }

    fn parse_blockquote(&mut self) -> Block {
        let open_line = self.lines[self.pos];
        let mut inner: Vec<Line<'a>> = Vec::new();

        while self.pos < self.lines.len() {
            let line = self.lines[self.pos];
            match strip_blockquote_marker(line.text) {
                Some(rest) => {
                    inner.push(Line {
                        text: rest,
                        number: line.number,
                    });
                    self.pos += 1;
                }
                None => break,
            }
        }

        let children = BlockParser::nested(inner, false).parse();
        Block::BlockQuote(BlockQuote {
            children,
            line: open_line.number,
        })
    }

    fn parse_heading(&mut self, level: usize) -> Block {
        let line = self.lines[self.pos];
        let content = parse_inline_text(heading_text(line.text, level), false);
        self.pos += 1;
        Block::Heading(Heading {
            level: level as u8,
            content,
            line: line.number,
        })
    }

    fn parse_fenced_code(&mut self, fence: FenceInfo) -> Block {
        let open_line = self.lines[self.pos];
        self.pos += 1;

        let mut content: Vec<&str> = Vec::new();
        while self.pos < self.lines.len() {
            let line = self.lines[self.pos];
            if is_closing_fence(line.text, &fence) {
                self.pos += 1;
                break;
            }
            content.push(strip_indent(line.text, fence.indent));
            self.pos += 1;
        }

        let mut literal = content.join("\n");
        if !content.is_empty() {
            literal.push('\n');
        }
        let info = if fence.info_string.is_empty() {
            None
        } else {
            Some(fence.info_string)
        };
        Block::CodeBlock(CodeBlock {
            info,
            literal,
            line: open_line.number,
        })
    }

    fn parse_indented_code(&mut self) -> Block {
        let open_line = self.lines[self.pos];
        let mut content: Vec<&str> = Vec::new();
        let mut pending_blanks = 0;

        while self.pos < self.lines.len() {
            let line = self.lines[self.pos];
            if is_indented_code_line(line.text) {
                for _ in 0..pending_blanks {
                    content.push("");
                }
                pending_blanks = 0;
                content.push(strip_indent(line.text, 4));
                self.pos += 1;
            } else if is_blank(line.text) {
                // Only kept when more code follows
                pending_blanks += 1;
                self.pos += 1;
            } else {
                break;
            }
        }

        let mut literal = content.join("\n");
        literal.push('\n');
        Block::CodeBlock(CodeBlock {
            info: None,
            literal,
            line: open_line.number,
        })
    }

    fn parse_list(&mut self, first_marker: ListMarkerInfo) -> Block {
        let open_line = self.lines[self.pos];
        let mut items: Vec<ListItem> = Vec::new();
        let mut loose = false;
        let mut marker = first_marker;

        loop {
            let item_line = self.lines[self.pos];
            let mut inner: Vec<Line<'a>> = Vec::new();
            inner.push(Line {
                text: &item_line.text[marker.content_offset..],
                number: item_line.number,
            });
            self.pos += 1;

            let mut pending_blanks: Vec<Line<'a>> = Vec::new();
            let mut internal_blank = false;
            let mut next_marker: Option<ListMarkerInfo> = None;

            while self.pos < self.lines.len() {
                let line = self.lines[self.pos];
                if is_blank(line.text) {
                    pending_blanks.push(Line {
                        text: "",
                        number: line.number,
                    });
                    self.pos += 1;
                    continue;
                }
                if indent_width(line.text) >= marker.content_column {
                    if !pending_blanks.is_empty() {
                        internal_blank = true;
                        inner.append(&mut pending_blanks);
                    }
                    inner.push(Line {
                        text: strip_indent(line.text, marker.content_column),
                        number: line.number,
                    });
                    self.pos += 1;
                    continue;
                }
                if is_thematic_break(line.text) {
                    break;
                }
                if let Some(info) = try_parse_list_marker(line.text)
                    && info.continues_list(&marker)
                {
                    if !pending_blanks.is_empty() {
                        loose = true;
                    }
                    next_marker = Some(info);
                }
                break;
            }

            let children = BlockParser::nested(inner, true).parse();
            if internal_blank && children.len() > 1 {
                loose = true;
            }
            items.push(ListItem {
                children,
                line: item_line.number,
                task: None,
            });

            match next_marker {
                Some(info) => marker = info,
                None => break,
            }
        }

        log::debug!(
            "list at line {} with {} items, loose={}",
            open_line.number,
            items.len(),
            loose
        );
        Block::List(List {
            ordered: first_marker.ordered,
            start: first_marker.start,
            tight: !loose,
            items,
            line: open_line.number,
        })
    }

    fn parse_paragraph(&mut self, first_block: bool) -> Block {
        let open_line = self.lines[self.pos];
        let mut parts: Vec<&str> = Vec::new();

        while self.pos < self.lines.len() {
            let line = self.lines[self.pos];
            if is_blank(line.text) {
                break;
            }
            if !parts.is_empty() && interrupts_paragraph(line.text) {
                break;
            }
            parts.push(line.text.trim_start());
            self.pos += 1;
        }

        let text = parts.join("\n");
        let task_candidate = self.in_list_item && first_block;
        let content = parse_inline_text(text.trim_end(), task_candidate);
        Block::Paragraph(Paragraph {
            content,
            line: open_line.number,
        })
    }
}

/// Block starts that may cut a paragraph short. Indented code and
/// ordered lists not starting at 1 never interrupt.
fn interrupts_paragraph(text: &str) -> bool {
    try_parse_callout_open(text).is_some()
        || try_parse_embed_open(text).is_some()
        || strip_blockquote_marker(text).is_some()
        || try_parse_atx_heading(text).is_some()
        || try_parse_fence_open(text).is_some()
        || is_thematic_break(text)
        || try_parse_list_marker(text)
            .is_some_and(|info| info.has_content && (!info.ordered || info.start == 1))
}

fn join_line_texts(lines: &[Line<'_>]) -> String {
    lines
        .iter()
        .map(|line| line.text)
        .collect::<Vec<_>>()
        .join("\n")
}
