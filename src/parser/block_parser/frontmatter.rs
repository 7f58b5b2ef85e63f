//! YAML front-matter recognition.
//!
//! Front matter opens with a `---` fence on the first content of the
//! document and runs until the next `---` fence. The raw body is parsed as
//! YAML at close time; anything that is not a mapping degrades to an empty
//! mapping rather than an error.

use serde_yaml::{Mapping, Value};

use super::utils::indent_width;

/// A front-matter fence is `---` alone on a line, at most 3 columns deep.
pub(crate) fn is_frontmatter_fence(text: &str) -> bool {
    indent_width(text) < 4 && text.trim() == "---"
}

/// Parse raw front-matter text into a mapping.
pub(crate) fn parse_frontmatter_yaml(raw: &str) -> Mapping {
    match serde_yaml::from_str::<Value>(raw) {
        Ok(Value::Mapping(mapping)) => mapping,
        Ok(_) => {
            log::debug!("front matter is not a mapping, ignoring");
            Mapping::new()
        }
        Err(err) => {
            log::debug!("front matter failed to parse as YAML: {}", err);
            Mapping::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fence_detection() {
        assert!(is_frontmatter_fence("---"));
        assert!(is_frontmatter_fence("--- "));
        assert!(is_frontmatter_fence("   ---"));
        assert!(!is_frontmatter_fence("    ---"));
        assert!(!is_frontmatter_fence("----"));
        assert!(!is_frontmatter_fence("--- x"));
    }

    #[test]
    fn test_parse_mapping() {
        let mapping = parse_frontmatter_yaml("title: Notes\ncount: 3\n");
        assert_eq!(mapping.len(), 2);
        assert_eq!(
            mapping.get(Value::String("title".to_string())),
            Some(&Value::String("Notes".to_string()))
        );
    }

    #[test]
    fn test_non_mapping_yields_empty() {
        assert!(parse_frontmatter_yaml("just a scalar").is_empty());
        assert!(parse_frontmatter_yaml("- a\n- b\n").is_empty());
        assert!(parse_frontmatter_yaml("").is_empty());
    }

    #[test]
    fn test_invalid_yaml_yields_empty() {
        assert!(parse_frontmatter_yaml("a: [unclosed").is_empty());
    }
}
