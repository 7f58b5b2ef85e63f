//! Pluggable resolver contracts.
//!
//! Resolvers are optional collaborators injected at renderer or extractor
//! construction. A missing resolver is not an error; rendering degrades to
//! the non-linked fallback forms. Resolvers run synchronously and the
//! engine does not catch panics raised inside them.

use serde_yaml::Mapping;

use crate::ast::Document;
use crate::metadata::ComputedFacts;

/// Result of resolving a mention identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMention {
    pub label: String,
    /// `None` means the identifier is known but has no profile URL; the
    /// mention then renders as a plain span.
    pub url: Option<String>,
}

/// Result of resolving an embed URL, e.g. from an oEmbed lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedEmbed {
    /// Provider-assigned kind, e.g. `"video"` or `"rich"`.
    pub kind: String,
    /// Pre-built HTML. Empty or absent falls back to the link rendering.
    pub html: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub provider_name: Option<String>,
    pub url: Option<String>,
}

/// Maps `@mention` identifiers to display labels and profile URLs.
pub trait MentionResolver {
    fn resolve(&self, identifier: &str) -> Option<ResolvedMention>;
}

impl<F> MentionResolver for F
where
    F: Fn(&str) -> Option<ResolvedMention>,
{
    fn resolve(&self, identifier: &str) -> Option<ResolvedMention> {
        self(identifier)
    }
}

/// Maps embed URLs to provider metadata and optional pre-built HTML.
pub trait EmbedResolver {
    fn resolve(&self, url: &str) -> Option<ResolvedEmbed>;
}

impl<F> EmbedResolver for F
where
    F: Fn(&str) -> Option<ResolvedEmbed>,
{
    fn resolve(&self, url: &str) -> Option<ResolvedEmbed> {
        self(url)
    }
}

/// Derives extra metadata fields from a parsed document.
///
/// Resolvers run in registration order after the built-in facts are
/// computed; their returned mappings merge into the `custom` bucket of
/// [`crate::metadata::DocumentMetadata`], later keys overwriting earlier
/// ones.
pub trait ComputedFieldResolver {
    fn resolve(
        &self,
        document: &Document,
        frontmatter: &Mapping,
        computed: &ComputedFacts,
    ) -> Mapping;
}

impl<F> ComputedFieldResolver for F
where
    F: Fn(&Document, &Mapping, &ComputedFacts) -> Mapping,
{
    fn resolve(
        &self,
        document: &Document,
        frontmatter: &Mapping,
        computed: &ComputedFacts,
    ) -> Mapping {
        self(document, frontmatter, computed)
    }
}
