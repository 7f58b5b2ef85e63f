pub mod ast;
pub mod config;
pub mod merge;
pub mod metadata;
pub mod parser;
pub mod render;
pub mod resolver;

pub use ast::Block;
pub use ast::Document;
pub use ast::Inline;
pub use ast::TaskState;
pub use config::Config;
pub use config::ConfigBuilder;
pub use config::RenderProfile;
pub use merge::merge;
pub use merge::BfmDocument;
pub use merge::MergeError;
pub use merge::MergeOptions;
pub use merge::MergeStrategy;
pub use metadata::DocumentMetadata;
pub use metadata::MetadataExtractor;
pub use parser::parse;
pub use render::HtmlRenderer;
pub use resolver::ComputedFieldResolver;
pub use resolver::EmbedResolver;
pub use resolver::MentionResolver;
pub use resolver::ResolvedEmbed;
pub use resolver::ResolvedMention;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Converts a BFM document straight to HTML.
///
/// Parses the input (including the task decoration pass) and renders it
/// with an [`HtmlRenderer`] built from `config`. Resolver-aware rendering
/// goes through [`HtmlRenderer`] directly.
///
/// # Examples
///
/// ```rust
/// use bfm::{convert, Config};
///
/// let html = convert("- [x] ship it", &Config::default());
/// assert!(html.contains("task-marker--done"));
/// ```
pub fn convert(input: &str, config: &Config) -> String {
    let document = parse(input);
    HtmlRenderer::new(config).render(&document)
}
