//! Typed AST for BFM documents.
//!
//! The tree is a closed pair of sum types: [`Block`] for block-level nodes
//! and [`Inline`] for inline content. Blocks own their children, so the
//! whole document is a plain owned tree with no interior mutability. Nodes
//! are built once during parsing and never mutated afterwards, except for
//! the task decoration attached to list items by the post-parse pass.

use serde::Serialize;
use serde_yaml::Mapping;

/// A parsed document: the root of the block tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub children: Vec<Block>,
}

impl Document {
    /// Returns the front-matter mapping when the document starts with a
    /// front-matter block.
    pub fn frontmatter(&self) -> Option<&Mapping> {
        match self.children.first() {
            Some(Block::Frontmatter(fm)) => Some(&fm.data),
            _ => None,
        }
    }

    /// Walks the tree in document order, firing an enter and an exit event
    /// for every block, list item, and inline node.
    pub fn walk<'a, F>(&'a self, f: &mut F)
    where
        F: FnMut(WalkEvent<'a>),
    {
        for block in &self.children {
            walk_block(block, f);
        }
    }
}

/// Block-level node kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Frontmatter(FrontmatterBlock),
    Callout(CalloutBlock),
    Embed(EmbedBlock),
    Paragraph(Paragraph),
    Heading(Heading),
    List(List),
    BlockQuote(BlockQuote),
    CodeBlock(CodeBlock),
    ThematicBreak(ThematicBreak),
}

impl Block {
    /// 1-based source line on which the block starts.
    pub fn line(&self) -> usize {
        match self {
            Block::Frontmatter(b) => b.line,
            Block::Callout(b) => b.line,
            Block::Embed(b) => b.line,
            Block::Paragraph(b) => b.line,
            Block::Heading(b) => b.line,
            Block::List(b) => b.line,
            Block::BlockQuote(b) => b.line,
            Block::CodeBlock(b) => b.line,
            Block::ThematicBreak(b) => b.line,
        }
    }
}

/// YAML front-matter. Only ever the first block of a document.
///
/// `data` is empty whenever the raw YAML does not parse to a mapping; a
/// scalar, a sequence, an empty body, or malformed YAML all degrade to an
/// empty map rather than an error.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontmatterBlock {
    pub raw_yaml: String,
    pub data: Mapping,
    pub line: usize,
}

/// An `@callout ... @endcallout` container block.
#[derive(Debug, Clone, PartialEq)]
pub struct CalloutBlock {
    /// Callout category, `"info"` when unspecified.
    pub kind: String,
    /// Header text; empty means no header is rendered.
    pub title: String,
    pub children: Vec<Block>,
    pub line: usize,
}

/// An `@embed url ... @endembed` leaf block.
///
/// The interior lines are never reparsed as markdown; they are joined and
/// trimmed into `caption` exactly once when the block closes.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbedBlock {
    pub url: String,
    pub caption: String,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub content: Vec<Inline>,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    /// Heading level, 1 through 6.
    pub level: u8,
    pub content: Vec<Inline>,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct List {
    pub ordered: bool,
    /// Starting number of an ordered list; 1 for bullet lists.
    pub start: u64,
    /// Tight lists render item paragraphs without `<p>` wrappers.
    pub tight: bool,
    pub items: Vec<ListItem>,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub children: Vec<Block>,
    pub line: usize,
    /// Present only after the post-parse pass, and only on items whose
    /// first child is a paragraph starting with a task marker.
    pub task: Option<TaskDecoration>,
}

/// The two derived attributes the post-parse pass computes for task items.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDecoration {
    /// State class, e.g. `"done"`.
    pub state_class: String,
    /// Composite item class, e.g. `"task-item task-item--done"`.
    pub item_class: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockQuote {
    pub children: Vec<Block>,
    pub line: usize,
}

/// Fenced or indented code. `info` is the fence info string, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlock {
    pub info: Option<String>,
    pub literal: String,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThematicBreak {
    pub line: usize,
}

/// Inline node kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text(String),
    Code(String),
    Emphasis(Vec<Inline>),
    Strong(Vec<Inline>),
    Strikethrough(Vec<Inline>),
    Link {
        url: String,
        title: Option<String>,
        children: Vec<Inline>,
    },
    Image {
        url: String,
        title: Option<String>,
        alt: String,
    },
    SoftBreak,
    HardBreak,
    TaskMarker(TaskState),
    TaskModifier {
        key: String,
        /// `None` denotes a boolean flag (`//hard` as opposed to `//due:...`).
        value: Option<String>,
    },
    Mention {
        identifier: String,
    },
    Hashtag {
        identifier: String,
    },
}

/// The seven task states a `[<c>]` marker can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    Open,
    Done,
    Scheduled,
    Migrated,
    Irrelevant,
    Event,
    Priority,
}

impl TaskState {
    pub const ALL: [TaskState; 7] = [
        TaskState::Open,
        TaskState::Done,
        TaskState::Scheduled,
        TaskState::Migrated,
        TaskState::Irrelevant,
        TaskState::Event,
        TaskState::Priority,
    ];

    /// Maps a marker character to its state. Case-folded, so `X` and `x`
    /// both map to `Done`. Unknown characters map to nothing.
    pub fn from_marker(c: char) -> Option<TaskState> {
        match c.to_ascii_lowercase() {
            ' ' => Some(TaskState::Open),
            'x' => Some(TaskState::Done),
            '>' => Some(TaskState::Scheduled),
            '<' => Some(TaskState::Migrated),
            '-' => Some(TaskState::Irrelevant),
            'o' => Some(TaskState::Event),
            '!' => Some(TaskState::Priority),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskState::Open => "Open",
            TaskState::Done => "Done",
            TaskState::Scheduled => "Scheduled",
            TaskState::Migrated => "Migrated",
            TaskState::Irrelevant => "Irrelevant",
            TaskState::Event => "Event",
            TaskState::Priority => "Priority",
        }
    }

    /// Lower-cased label, used in CSS classes and `data-state` attributes.
    pub fn css_class(&self) -> &'static str {
        match self {
            TaskState::Open => "open",
            TaskState::Done => "done",
            TaskState::Scheduled => "scheduled",
            TaskState::Migrated => "migrated",
            TaskState::Irrelevant => "irrelevant",
            TaskState::Event => "event",
            TaskState::Priority => "priority",
        }
    }

    /// Single glyph shown inside the rendered marker.
    pub fn icon(&self) -> &'static str {
        match self {
            TaskState::Open => "\u{25CB}",       // ○
            TaskState::Done => "\u{2713}",       // ✓
            TaskState::Scheduled => "\u{25B7}",  // ▷
            TaskState::Migrated => "\u{25C1}",   // ◁
            TaskState::Irrelevant => "\u{2014}", // —
            TaskState::Event => "\u{25C6}",      // ◆
            TaskState::Priority => "\u{203C}",   // ‼
        }
    }
}

/// A node reference handed to walk callbacks.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Block(&'a Block),
    Item(&'a ListItem),
    Inline(&'a Inline),
}

/// Pre/post visit events in document order. Leaf nodes fire an enter
/// event immediately followed by their exit event.
#[derive(Debug, Clone, Copy)]
pub enum WalkEvent<'a> {
    Enter(NodeRef<'a>),
    Exit(NodeRef<'a>),
}

fn walk_block<'a, F>(block: &'a Block, f: &mut F)
where
    F: FnMut(WalkEvent<'a>),
{
    f(WalkEvent::Enter(NodeRef::Block(block)));
    match block {
        Block::Callout(callout) => {
            for child in &callout.children {
                walk_block(child, f);
            }
        }
        Block::BlockQuote(quote) => {
            for child in &quote.children {
                walk_block(child, f);
            }
        }
        Block::List(list) => {
            for item in &list.items {
                f(WalkEvent::Enter(NodeRef::Item(item)));
                for child in &item.children {
                    walk_block(child, f);
                }
                f(WalkEvent::Exit(NodeRef::Item(item)));
            }
        }
        Block::Paragraph(para) => {
            for inline in &para.content {
                walk_inline(inline, f);
            }
        }
        Block::Heading(heading) => {
            for inline in &heading.content {
                walk_inline(inline, f);
            }
        }
        Block::Frontmatter(_)
        | Block::Embed(_)
        | Block::CodeBlock(_)
        | Block::ThematicBreak(_) => {}
    }
    f(WalkEvent::Exit(NodeRef::Block(block)));
}

fn walk_inline<'a, F>(inline: &'a Inline, f: &mut F)
where
    F: FnMut(WalkEvent<'a>),
{
    f(WalkEvent::Enter(NodeRef::Inline(inline)));
    match inline {
        Inline::Emphasis(children)
        | Inline::Strong(children)
        | Inline::Strikethrough(children)
        | Inline::Link { children, .. } => {
            for child in children {
                walk_inline(child, f);
            }
        }
        _ => {}
    }
    f(WalkEvent::Exit(NodeRef::Inline(inline)));
}
