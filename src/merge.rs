//! Merging multiple documents into one.
//!
//! A merge folds a slice of documents left to right: bodies concatenate
//! under a separator and front-matter maps deep-merge key by key. Only a
//! scalar-level conflict under the `Error` strategy can fail; everything
//! else combines structurally.

use serde_yaml::{Mapping, Value};

/// A document reduced to the two parts the merger works on.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BfmDocument {
    pub frontmatter: Mapping,
    pub body: String,
}

/// How to combine two values that cannot be merged structurally.
pub enum MergeStrategy {
    /// Keep the incoming value.
    LastWins,
    /// Keep the existing value.
    FirstWins,
    /// Fail with [`MergeError::Conflict`].
    Error,
    /// Ask a caller-supplied function; its return value is kept.
    Resolve(Box<dyn Fn(&str, &Value, &Value) -> Value>),
}

impl std::fmt::Debug for MergeStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LastWins => f.write_str("LastWins"),
            Self::FirstWins => f.write_str("FirstWins"),
            Self::Error => f.write_str("Error"),
            Self::Resolve(_) => f.write_str("Resolve(..)"),
        }
    }
}

#[derive(Debug)]
pub struct MergeOptions {
    pub strategy: MergeStrategy,
    /// Inserted between two non-empty bodies.
    pub separator: String,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            strategy: MergeStrategy::LastWins,
            separator: "\n\n".to_string(),
        }
    }
}

/// Errors raised by [`merge`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// Two values at the same key could not be merged under the `Error`
    /// strategy.
    Conflict {
        key: String,
        existing_kind: &'static str,
        incoming_kind: &'static str,
    },
}

impl std::fmt::Display for MergeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Conflict {
                key,
                existing_kind,
                incoming_kind,
            } => write!(
                f,
                "Merge conflict at key \"{}\": cannot merge {} with {}",
                key, existing_kind, incoming_kind
            ),
        }
    }
}

impl std::error::Error for MergeError {}

/// Merges documents left to right. An empty slice yields a document with
/// an empty front-matter map and an empty body.
pub fn merge(documents: &[BfmDocument], options: &MergeOptions) -> Result<BfmDocument, MergeError> {
    let Some((first, rest)) = documents.split_first() else {
        return Ok(BfmDocument::default());
    };

    let mut result = first.clone();
    for document in rest {
        result.body = join_bodies(&result.body, &document.body, &options.separator);
        result.frontmatter = deep_merge(&result.frontmatter, &document.frontmatter, options)?;
    }
    log::debug!("merged {} documents", documents.len());
    Ok(result)
}

/// Two non-empty bodies join under the separator; an empty side
/// concatenates without one.
fn join_bodies(left: &str, right: &str, separator: &str) -> String {
    if !left.is_empty() && !right.is_empty() {
        format!("{left}{separator}{right}")
    } else {
        format!("{left}{right}")
    }
}

fn deep_merge(
    target: &Mapping,
    source: &Mapping,
    options: &MergeOptions,
) -> Result<Mapping, MergeError> {
    let mut result = target.clone();
    for (key, incoming) in source {
        // Replacing an existing key keeps its original position.
        let merged = match result.get(key) {
            None => incoming.clone(),
            Some(existing) => merge_values(key, existing.clone(), incoming, options)?,
        };
        result.insert(key.clone(), merged);
    }
    Ok(result)
}

fn merge_values(
    key: &Value,
    existing: Value,
    incoming: &Value,
    options: &MergeOptions,
) -> Result<Value, MergeError> {
    match (existing, incoming) {
        (Value::Sequence(mut existing), Value::Sequence(incoming)) => {
            existing.extend(incoming.iter().cloned());
            Ok(Value::Sequence(existing))
        }
        (Value::Mapping(existing), Value::Mapping(incoming)) => {
            Ok(Value::Mapping(deep_merge(&existing, incoming, options)?))
        }
        (existing, incoming) => resolve_conflict(key, &existing, incoming, &options.strategy),
    }
}

fn resolve_conflict(
    key: &Value,
    existing: &Value,
    incoming: &Value,
    strategy: &MergeStrategy,
) -> Result<Value, MergeError> {
    match strategy {
        MergeStrategy::LastWins => Ok(incoming.clone()),
        MergeStrategy::FirstWins => Ok(existing.clone()),
        MergeStrategy::Error => Err(MergeError::Conflict {
            key: key_name(key),
            existing_kind: value_kind(existing),
            incoming_kind: value_kind(incoming),
        }),
        MergeStrategy::Resolve(resolve) => Ok(resolve(&key_name(key), existing, incoming)),
    }
}

/// Front-matter keys are almost always strings; other key types fall back
/// to their YAML rendering.
fn key_name(key: &Value) -> String {
    match key {
        Value::String(key) => key.clone(),
        other => serde_yaml::to_string(other)
            .map(|rendered| rendered.trim_end().to_string())
            .unwrap_or_default(),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(number) => {
            if number.is_f64() {
                "float"
            } else {
                "integer"
            }
        }
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(yaml: &str, body: &str) -> BfmDocument {
        let frontmatter = if yaml.is_empty() {
            Mapping::new()
        } else {
            serde_yaml::from_str(yaml).unwrap()
        };
        BfmDocument {
            frontmatter,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_empty_input_yields_empty_document() {
        let merged = merge(&[], &MergeOptions::default()).unwrap();
        assert!(merged.frontmatter.is_empty());
        assert_eq!(merged.body, "");
    }

    #[test]
    fn test_merges_non_overlapping_keys() {
        let merged = merge(
            &[doc("key1: value1", "Body A"), doc("keyA: valueB", "Body B")],
            &MergeOptions::default(),
        )
        .unwrap();
        assert_eq!(merged.body, "Body A\n\nBody B");
        assert_eq!(
            merged.frontmatter.get("key1"),
            Some(&Value::String("value1".to_string()))
        );
        assert_eq!(
            merged.frontmatter.get("keyA"),
            Some(&Value::String("valueB".to_string()))
        );
    }

    #[test]
    fn test_empty_bodies_concatenate_without_separator() {
        let merged = merge(
            &[doc("", ""), doc("", "only body")],
            &MergeOptions::default(),
        )
        .unwrap();
        assert_eq!(merged.body, "only body");
    }

    #[test]
    fn test_sequences_concatenate() {
        let merged = merge(
            &[doc("tags: [a1, a2]", ""), doc("tags: [b1, b2]", "")],
            &MergeOptions::default(),
        )
        .unwrap();
        let expected: Value = serde_yaml::from_str("[a1, a2, b1, b2]").unwrap();
        assert_eq!(merged.frontmatter.get("tags"), Some(&expected));
    }

    #[test]
    fn test_nested_mappings_recurse() {
        let merged = merge(
            &[
                doc("author:\n  name: Nick\n  role: dev", ""),
                doc("author:\n  email: nick@example.com", ""),
            ],
            &MergeOptions::default(),
        )
        .unwrap();
        let expected: Value =
            serde_yaml::from_str("name: Nick\nrole: dev\nemail: nick@example.com").unwrap();
        assert_eq!(merged.frontmatter.get("author"), Some(&expected));
    }

    #[test]
    fn test_last_wins_is_the_default() {
        let merged = merge(
            &[doc("title: A", ""), doc("title: B", "")],
            &MergeOptions::default(),
        )
        .unwrap();
        assert_eq!(
            merged.frontmatter.get("title"),
            Some(&Value::String("B".to_string()))
        );
    }

    #[test]
    fn test_first_wins_strategy() {
        let options = MergeOptions {
            strategy: MergeStrategy::FirstWins,
            ..Default::default()
        };
        let merged = merge(&[doc("title: A", ""), doc("title: B", "")], &options).unwrap();
        assert_eq!(
            merged.frontmatter.get("title"),
            Some(&Value::String("A".to_string()))
        );
    }

    #[test]
    fn test_error_strategy_names_the_key_and_kinds() {
        let options = MergeOptions {
            strategy: MergeStrategy::Error,
            ..Default::default()
        };
        let err = merge(&[doc("title: A", ""), doc("title: 3", "")], &options).unwrap_err();
        assert_eq!(
            err,
            MergeError::Conflict {
                key: "title".to_string(),
                existing_kind: "string",
                incoming_kind: "integer",
            }
        );
        assert_eq!(
            err.to_string(),
            "Merge conflict at key \"title\": cannot merge string with integer"
        );
    }

    #[test]
    fn test_error_strategy_allows_structural_merges() {
        let options = MergeOptions {
            strategy: MergeStrategy::Error,
            ..Default::default()
        };
        let merged = merge(
            &[doc("tags: [a]", ""), doc("tags: [b]", "")],
            &options,
        )
        .unwrap();
        let expected: Value = serde_yaml::from_str("[a, b]").unwrap();
        assert_eq!(merged.frontmatter.get("tags"), Some(&expected));
    }

    #[test]
    fn test_resolve_strategy_keeps_returned_value() {
        let options = MergeOptions {
            strategy: MergeStrategy::Resolve(Box::new(|key, existing, incoming| {
                assert_eq!(key, "count");
                let sum = existing.as_i64().unwrap() + incoming.as_i64().unwrap();
                Value::Number(sum.into())
            })),
            ..Default::default()
        };
        let merged = merge(&[doc("count: 1", ""), doc("count: 2", "")], &options).unwrap();
        assert_eq!(merged.frontmatter.get("count"), Some(&Value::Number(3.into())));
    }

    #[test]
    fn test_three_documents_fold_left_to_right() {
        let merged = merge(
            &[
                doc("tags: [a]", "A"),
                doc("tags: [b]", "B"),
                doc("tags: [c]", "C"),
            ],
            &MergeOptions::default(),
        )
        .unwrap();
        assert_eq!(merged.body, "A\n\nB\n\nC");
        let expected: Value = serde_yaml::from_str("[a, b, c]").unwrap();
        assert_eq!(merged.frontmatter.get("tags"), Some(&expected));
    }

    #[test]
    fn test_custom_separator() {
        let options = MergeOptions {
            separator: "\n---\n".to_string(),
            ..Default::default()
        };
        let merged = merge(&[doc("", "A"), doc("", "B")], &options).unwrap();
        assert_eq!(merged.body, "A\n---\nB");
    }

    #[test]
    fn test_sequence_and_scalar_conflict_uses_strategy() {
        let merged = merge(
            &[doc("tags: [a]", ""), doc("tags: solo", "")],
            &MergeOptions::default(),
        )
        .unwrap();
        assert_eq!(
            merged.frontmatter.get("tags"),
            Some(&Value::String("solo".to_string()))
        );
    }
}
