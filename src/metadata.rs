//! Metadata extraction from parsed documents.
//!
//! The extractor is a pure function of a finished AST plus configuration.
//! It computes a fixed set of built-in facts (word count, reading time,
//! tasks, tags, links) in a single set of walks, then runs any configured
//! computed-field resolvers whose results land in a separate `custom`
//! bucket. Nothing here holds references into the AST; every returned
//! value is freshly owned.

use serde::Serialize;
use serde_yaml::{Mapping, Value};

use crate::ast::{
    Block, Document, Inline, ListItem, NodeRef, TaskState, WalkEvent,
};
use crate::config::Config;
use crate::resolver::ComputedFieldResolver;

/// Everything extracted from one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentMetadata {
    /// Front-matter mapping, empty when the document has none.
    pub frontmatter: Mapping,
    /// The built-in facts.
    pub computed: ComputedFacts,
    /// Merged output of the configured computed-field resolvers.
    pub custom: Mapping,
}

/// Built-in facts computed for every document.
///
/// Serializes with camelCase keys (`wordCount`, `readingTime`) so the
/// output matches the key names consumers already index by.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedFacts {
    pub word_count: usize,
    /// `ceil(word_count / words_per_minute)` minutes; 0 for an empty document.
    pub reading_time: usize,
    pub tasks: TaskCollection,
    pub tags: Vec<String>,
    pub links: Vec<LinkReference>,
}

/// One task harvested from a list item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedTask {
    /// Concatenated plain text of the task line, trimmed. Markers,
    /// modifiers, mentions, and hashtags do not contribute.
    pub text: String,
    pub state: TaskState,
    /// Modifiers on the task line, in source order.
    pub modifiers: Vec<Modifier>,
    /// 1-based source line of the owning list item.
    pub line: usize,
}

/// A `//key[:value]` modifier lifted off a task line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Modifier {
    pub key: String,
    pub value: Option<String>,
}

/// All tasks of a document, partitioned by state.
///
/// Every task appears once in `all` and once in the bucket matching its
/// state; both orderings follow document order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TaskCollection {
    pub all: Vec<ExtractedTask>,
    pub open: Vec<ExtractedTask>,
    pub done: Vec<ExtractedTask>,
    pub scheduled: Vec<ExtractedTask>,
    pub migrated: Vec<ExtractedTask>,
    pub irrelevant: Vec<ExtractedTask>,
    pub event: Vec<ExtractedTask>,
    pub priority: Vec<ExtractedTask>,
}

impl TaskCollection {
    fn push(&mut self, task: ExtractedTask) {
        let bucket = match task.state {
            TaskState::Open => &mut self.open,
            TaskState::Done => &mut self.done,
            TaskState::Scheduled => &mut self.scheduled,
            TaskState::Migrated => &mut self.migrated,
            TaskState::Irrelevant => &mut self.irrelevant,
            TaskState::Event => &mut self.event,
            TaskState::Priority => &mut self.priority,
        };
        bucket.push(task.clone());
        self.all.push(task);
    }
}

/// A link or image occurrence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkReference {
    pub url: String,
    /// `None` covers both an absent and an empty title.
    pub title: Option<String>,
    /// 1-based line of the nearest enclosing block.
    pub line: usize,
}

/// Computes [`DocumentMetadata`] for parsed documents.
///
/// Borrows its configuration and any computed-field resolvers, so one
/// extractor can serve many documents.
pub struct MetadataExtractor<'a> {
    config: &'a Config,
    computed_fields: Vec<&'a dyn ComputedFieldResolver>,
}

impl<'a> MetadataExtractor<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            computed_fields: Vec::new(),
        }
    }

    /// Registers a computed-field resolver. Resolvers run in registration
    /// order and later keys overwrite earlier ones in the `custom` bucket.
    pub fn with_computed_field(mut self, resolver: &'a dyn ComputedFieldResolver) -> Self {
        self.computed_fields.push(resolver);
        self
    }

    pub fn extract(&self, document: &Document) -> DocumentMetadata {
        let frontmatter = document.frontmatter().cloned().unwrap_or_default();

        let word_count = count_words(document);
        // A zero divisor would never terminate a reader anyway; clamp it.
        let words_per_minute = self.config.words_per_minute.max(1) as usize;
        let computed = ComputedFacts {
            word_count,
            reading_time: word_count.div_ceil(words_per_minute),
            tasks: extract_tasks(document),
            tags: extract_tags(document, &frontmatter),
            links: extract_links(document),
        };

        let mut custom = Mapping::new();
        for resolver in &self.computed_fields {
            for (key, value) in resolver.resolve(document, &frontmatter, &computed) {
                custom.insert(key, value);
            }
        }

        log::debug!(
            "extracted metadata: {} words, {} tasks, {} tags, {} links",
            computed.word_count,
            computed.tasks.all.len(),
            computed.tags.len(),
            computed.links.len()
        );

        DocumentMetadata {
            frontmatter,
            computed,
            custom,
        }
    }
}

/// Counts whitespace-separated tokens containing at least one alphanumeric
/// character over plain text, inline code, and code block literals. The
/// front-matter block carries no such leaves, so it never contributes.
fn count_words(document: &Document) -> usize {
    let mut count = 0;
    document.walk(&mut |event| {
        if let WalkEvent::Enter(node) = event {
            match node {
                NodeRef::Inline(Inline::Text(text)) | NodeRef::Inline(Inline::Code(text)) => {
                    count += words_in(text);
                }
                NodeRef::Block(Block::CodeBlock(code)) => count += words_in(&code.literal),
                _ => {}
            }
        }
    });
    count
}

fn words_in(text: &str) -> usize {
    text.split_whitespace()
        .filter(|token| token.chars().any(char::is_alphanumeric))
        .count()
}

fn extract_tasks(document: &Document) -> TaskCollection {
    let mut tasks = TaskCollection::default();
    document.walk(&mut |event| {
        if let WalkEvent::Enter(NodeRef::Item(item)) = event
            && let Some(task) = task_from_item(item)
        {
            tasks.push(task);
        }
    });
    tasks
}

/// Builds a task from a list item whose first child paragraph starts with
/// a task marker. Only that paragraph contributes text and modifiers;
/// nested list items become tasks of their own.
fn task_from_item(item: &ListItem) -> Option<ExtractedTask> {
    let Some(Block::Paragraph(paragraph)) = item.children.first() else {
        return None;
    };
    let Some(Inline::TaskMarker(state)) = paragraph.content.first() else {
        return None;
    };

    let mut text = String::new();
    let mut modifiers = Vec::new();
    collect_task_parts(&paragraph.content, &mut text, &mut modifiers);

    Some(ExtractedTask {
        text: text.trim().to_string(),
        state: *state,
        modifiers,
        line: item.line,
    })
}

fn collect_task_parts(inlines: &[Inline], text: &mut String, modifiers: &mut Vec<Modifier>) {
    for inline in inlines {
        match inline {
            Inline::Text(t) => text.push_str(t),
            Inline::TaskModifier { key, value } => modifiers.push(Modifier {
                key: key.clone(),
                value: value.clone(),
            }),
            Inline::Emphasis(children)
            | Inline::Strong(children)
            | Inline::Strikethrough(children)
            | Inline::Link { children, .. } => collect_task_parts(children, text, modifiers),
            _ => {}
        }
    }
}

/// Front-matter `tags` entries first, then inline hashtags, all
/// lower-cased and deduplicated preserving first-seen order.
fn extract_tags(document: &Document, frontmatter: &Mapping) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();

    if let Some(Value::Sequence(entries)) = frontmatter.get("tags") {
        for entry in entries {
            if let Value::String(tag) = entry {
                let tag = tag.to_lowercase();
                if !tags.contains(&tag) {
                    tags.push(tag);
                }
            }
        }
    }

    document.walk(&mut |event| {
        if let WalkEvent::Enter(NodeRef::Inline(Inline::Hashtag { identifier })) = event {
            let tag = identifier.to_lowercase();
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
    });

    tags
}

fn extract_links(document: &Document) -> Vec<LinkReference> {
    let mut links = Vec::new();
    let mut block_lines: Vec<usize> = Vec::new();
    document.walk(&mut |event| match event {
        WalkEvent::Enter(NodeRef::Block(block)) => block_lines.push(block.line()),
        WalkEvent::Exit(NodeRef::Block(_)) => {
            block_lines.pop();
        }
        WalkEvent::Enter(NodeRef::Inline(inline)) => {
            let (url, title) = match inline {
                Inline::Link { url, title, .. } => (url, title),
                Inline::Image { url, title, .. } => (url, title),
                _ => return,
            };
            links.push(LinkReference {
                url: url.clone(),
                title: title.clone().filter(|t| !t.is_empty()),
                line: block_lines.last().copied().unwrap_or(0),
            });
        }
        _ => {}
    });
    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigBuilder;
    use crate::parser::parse;

    fn extract(input: &str) -> DocumentMetadata {
        let config = Config::default();
        MetadataExtractor::new(&config).extract(&parse(input))
    }

    #[test]
    fn test_word_count() {
        let meta = extract("Hello world, this is four words more.\n");
        assert_eq!(meta.computed.word_count, 7);
    }

    #[test]
    fn test_word_count_excludes_frontmatter() {
        let meta = extract("---\ntitle: Test\n---\n\nTwo words.\n");
        assert_eq!(meta.computed.word_count, 2);
    }

    #[test]
    fn test_word_count_requires_alphanumeric() {
        let meta = extract("dash - dash --\n");
        assert_eq!(meta.computed.word_count, 2);
    }

    #[test]
    fn test_word_count_includes_code() {
        let meta = extract("run `cargo doc` now\n\n```\nfn main\n```\n");
        assert_eq!(meta.computed.word_count, 6);
    }

    #[test]
    fn test_word_count_empty_document() {
        let meta = extract("");
        assert_eq!(meta.computed.word_count, 0);
        assert_eq!(meta.computed.reading_time, 0);
    }

    #[test]
    fn test_reading_time_rounds_up() {
        assert_eq!(extract(&"word ".repeat(200)).computed.reading_time, 1);
        assert_eq!(extract(&"word ".repeat(201)).computed.reading_time, 2);
    }

    #[test]
    fn test_reading_time_custom_words_per_minute() {
        let config = ConfigBuilder::default().words_per_minute(100).build();
        let meta = MetadataExtractor::new(&config).extract(&parse(&"word ".repeat(100)));
        assert_eq!(meta.computed.reading_time, 1);
    }

    #[test]
    fn test_tasks_partitioned_by_state() {
        let meta = extract("- [ ] Open task\n- [x] Done task\n- [>] Scheduled task\n- [!] Priority task\n");
        let tasks = &meta.computed.tasks;
        assert_eq!(tasks.all.len(), 4);
        assert_eq!(tasks.open.len(), 1);
        assert_eq!(tasks.done.len(), 1);
        assert_eq!(tasks.scheduled.len(), 1);
        assert_eq!(tasks.priority.len(), 1);
        assert!(tasks.migrated.is_empty());
        assert_eq!(tasks.all[0].text, "Open task");
        assert_eq!(tasks.all[3].state, TaskState::Priority);
    }

    #[test]
    fn test_task_modifiers_in_order() {
        let meta = extract("- [>] Meeting //due:2025-03-01 //hard\n");
        let task = &meta.computed.tasks.scheduled[0];
        assert_eq!(task.text, "Meeting");
        assert_eq!(task.line, 1);
        assert_eq!(
            task.modifiers,
            vec![
                Modifier {
                    key: "due".to_string(),
                    value: Some("2025-03-01".to_string()),
                },
                Modifier {
                    key: "hard".to_string(),
                    value: None,
                },
            ]
        );
    }

    #[test]
    fn test_nested_task_items_stay_separate() {
        let meta = extract("- [ ] parent\n  - [x] child\n");
        let tasks = &meta.computed.tasks;
        assert_eq!(tasks.all.len(), 2);
        assert_eq!(tasks.all[0].text, "parent");
        assert_eq!(tasks.all[0].line, 1);
        assert_eq!(tasks.all[1].text, "child");
        assert_eq!(tasks.all[1].line, 2);
    }

    #[test]
    fn test_plain_items_are_not_tasks() {
        let meta = extract("- milk\n- eggs\n\nJust a paragraph.\n");
        assert!(meta.computed.tasks.all.is_empty());
    }

    #[test]
    fn test_tags_merge_and_dedup() {
        let meta = extract("---\ntags:\n  - BFM\n  - markdown\n---\n\nAbout #bfm and #TypeScript.\n");
        assert_eq!(meta.computed.tags, vec!["bfm", "markdown", "typescript"]);
    }

    #[test]
    fn test_tags_ignore_non_string_entries() {
        let meta = extract("---\ntags:\n  - 3\n  - ok\n---\n\nContent.\n");
        assert_eq!(meta.computed.tags, vec!["ok"]);
    }

    #[test]
    fn test_links_and_images() {
        let meta =
            extract("See [example](https://example.com \"Title\") and ![alt](https://img.example.com/p.jpg).\n");
        let links = &meta.computed.links;
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].url, "https://example.com");
        assert_eq!(links[0].title.as_deref(), Some("Title"));
        assert_eq!(links[1].url, "https://img.example.com/p.jpg");
        assert_eq!(links[1].title, None);
    }

    #[test]
    fn test_link_line_is_enclosing_block_line() {
        let meta = extract("intro\n\n[a](https://a.dev)\n");
        assert_eq!(meta.computed.links[0].line, 3);
    }

    #[test]
    fn test_autolink_appears_in_link_inventory() {
        let meta = extract("Visit https://example.com/x now, or <https://b.dev>.\n");
        let urls: Vec<&str> = meta.computed.links.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(urls, vec!["https://example.com/x", "https://b.dev"]);
    }

    #[test]
    fn test_frontmatter_bucket() {
        let meta = extract("---\ntitle: Test\ncount: 42\n---\n\nContent.\n");
        assert_eq!(
            meta.frontmatter.get("title"),
            Some(&Value::String("Test".to_string()))
        );
        assert_eq!(meta.frontmatter.get("count"), Some(&Value::Number(42.into())));
        assert!(extract("Just content.\n").frontmatter.is_empty());
    }

    #[test]
    fn test_custom_resolver_output_lands_in_custom() {
        let double = |_: &Document, _: &Mapping, computed: &ComputedFacts| {
            let mut out = Mapping::new();
            out.insert(
                Value::String("doubleWordCount".to_string()),
                Value::Number(((computed.word_count * 2) as u64).into()),
            );
            out
        };
        let config = Config::default();
        let meta = MetadataExtractor::new(&config)
            .with_computed_field(&double)
            .extract(&parse("Hello world.\n"));
        assert_eq!(
            meta.custom.get("doubleWordCount"),
            Some(&Value::Number(4.into()))
        );
        assert!(meta.computed.tasks.all.is_empty());
    }

    #[test]
    fn test_later_resolver_keys_overwrite() {
        let first = |_: &Document, _: &Mapping, _: &ComputedFacts| {
            let mut out = Mapping::new();
            out.insert(Value::String("who".to_string()), Value::String("first".to_string()));
            out
        };
        let second = |_: &Document, _: &Mapping, _: &ComputedFacts| {
            let mut out = Mapping::new();
            out.insert(Value::String("who".to_string()), Value::String("second".to_string()));
            out
        };
        let config = Config::default();
        let meta = MetadataExtractor::new(&config)
            .with_computed_field(&first)
            .with_computed_field(&second)
            .extract(&parse("x\n"));
        assert_eq!(
            meta.custom.get("who"),
            Some(&Value::String("second".to_string()))
        );
    }

    #[test]
    fn test_computed_facts_serialize_camel_case() {
        let meta = extract("Two words.\n");
        let yaml = serde_yaml::to_string(&meta.computed).unwrap();
        assert!(yaml.contains("wordCount: 2"));
        assert!(yaml.contains("readingTime: 1"));
    }
}
