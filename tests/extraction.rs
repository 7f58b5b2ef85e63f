//! Metadata extraction and merge tests over the full parse pipeline.

use bfm::{merge, BfmDocument, Config, MergeOptions, MetadataExtractor, TaskState};
use serde_yaml::{Mapping, Value};

fn extract(input: &str) -> bfm::DocumentMetadata {
    let config = Config::default();
    MetadataExtractor::new(&config).extract(&bfm::parse(input))
}

#[test]
fn frontmatter_round_trips_through_a_document() {
    let mut mapping = Mapping::new();
    mapping.insert(
        Value::String("title".to_string()),
        Value::String("Weekly log".to_string()),
    );
    mapping.insert(
        Value::String("tags".to_string()),
        Value::Sequence(vec![
            Value::String("log".to_string()),
            Value::String("work".to_string()),
        ]),
    );
    mapping.insert(Value::String("revision".to_string()), Value::Number(3.into()));

    let yaml = serde_yaml::to_string(&mapping).unwrap();
    let input = format!("---\n{yaml}---\n\nBody text.\n");

    let document = bfm::parse(&input);
    assert_eq!(document.frontmatter(), Some(&mapping));

    let meta = extract(&input);
    assert_eq!(meta.frontmatter, mapping);
    assert_eq!(meta.computed.word_count, 2);
}

#[test]
fn tasks_flow_through_the_full_pipeline() {
    let input = "\
# Plan

- [x] finish draft //hard
- [ ] review @sam
  - [>] schedule sync //due:2025-03-01
- plain note
";
    let meta = extract(input);
    let tasks = &meta.computed.tasks;

    assert_eq!(tasks.all.len(), 3);
    assert_eq!(tasks.done.len(), 1);
    assert_eq!(tasks.open.len(), 1);
    assert_eq!(tasks.scheduled.len(), 1);

    assert_eq!(tasks.all[0].text, "finish draft");
    assert_eq!(tasks.all[0].state, TaskState::Done);
    assert_eq!(tasks.all[0].line, 3);
    assert_eq!(tasks.all[0].modifiers[0].key, "hard");

    // The nested item is its own task, not folded into the parent.
    assert_eq!(tasks.all[1].text, "review");
    assert_eq!(tasks.all[2].text, "schedule sync");
    assert_eq!(tasks.all[2].line, 5);
    assert_eq!(
        tasks.all[2].modifiers[0].value.as_deref(),
        Some("2025-03-01")
    );
}

#[test]
fn tags_merge_frontmatter_and_hashtags() {
    let meta = extract("---\ntags:\n  - BFM\n---\n\nAbout #BFM and #typescript.\n");
    assert_eq!(meta.computed.tags, vec!["bfm", "typescript"]);
}

#[test]
fn links_inventory_includes_autolinks() {
    let input = "intro\n\n[docs](https://docs.example \"Docs\") and <https://a.dev>\n\n![shot](https://img.example/s.png)\n";
    let meta = extract(input);
    let links = &meta.computed.links;

    assert_eq!(links.len(), 3);
    assert_eq!(links[0].url, "https://docs.example");
    assert_eq!(links[0].title.as_deref(), Some("Docs"));
    assert_eq!(links[0].line, 3);
    assert_eq!(links[1].url, "https://a.dev");
    assert_eq!(links[2].url, "https://img.example/s.png");
    assert_eq!(links[2].line, 5);
}

#[test]
fn metadata_serializes_with_camel_case_facts() {
    let meta = extract("- [x] done thing\n\nSome words here.\n");
    let yaml = serde_yaml::to_string(&meta).unwrap();
    assert!(yaml.contains("wordCount:"), "got: {yaml}");
    assert!(yaml.contains("readingTime:"), "got: {yaml}");
    assert!(yaml.contains("state: done"), "got: {yaml}");
}

#[test]
fn parsed_documents_merge_by_frontmatter_and_body() {
    let monday = bfm::parse("---\ntags: [monday]\n---\n\n- [x] a\n");
    let tuesday = bfm::parse("---\ntags: [tuesday]\n---\n\n- [ ] b\n");

    let docs = [
        BfmDocument {
            frontmatter: monday.frontmatter().cloned().unwrap_or_default(),
            body: "- [x] a".to_string(),
        },
        BfmDocument {
            frontmatter: tuesday.frontmatter().cloned().unwrap_or_default(),
            body: "- [ ] b".to_string(),
        },
    ];
    let merged = merge(&docs, &MergeOptions::default()).unwrap();

    assert_eq!(merged.body, "- [x] a\n\n- [ ] b");
    let expected: Value = serde_yaml::from_str("[monday, tuesday]").unwrap();
    assert_eq!(merged.frontmatter.get("tags"), Some(&expected));

    // The merged body parses back into a loose two-task list.
    let meta = {
        let config = Config::default();
        MetadataExtractor::new(&config).extract(&bfm::parse(&merged.body))
    };
    assert_eq!(meta.computed.tasks.all.len(), 2);
}
