//! The HTML renderer.
//!
//! Walks the tree once, bottom-up, producing a string per node. Block
//! output lines are joined with single newlines so the result matches
//! what a hand-written renderer emits line by line. Text and attribute
//! values are escaped; resolver-supplied embed HTML is trusted verbatim.

use crate::ast::{
    Block, CalloutBlock, CodeBlock, Document, EmbedBlock, Inline, List, ListItem,
};
use crate::config::{Config, RenderProfile};
use crate::resolver::{EmbedResolver, MentionResolver};

/// Renders a parsed [`Document`] to HTML.
///
/// Borrows its configuration and optional resolvers, so a single
/// renderer can be reused across documents without cloning either.
pub struct HtmlRenderer<'a> {
    config: &'a Config,
    mention_resolver: Option<&'a dyn MentionResolver>,
    embed_resolver: Option<&'a dyn EmbedResolver>,
}

impl<'a> HtmlRenderer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            mention_resolver: None,
            embed_resolver: None,
        }
    }

    /// Attaches a resolver used to turn `@mention` identifiers into links.
    pub fn with_mention_resolver(mut self, resolver: &'a dyn MentionResolver) -> Self {
        self.mention_resolver = Some(resolver);
        self
    }

    /// Attaches a resolver used to expand `@embed` URLs into rich HTML.
    pub fn with_embed_resolver(mut self, resolver: &'a dyn EmbedResolver) -> Self {
        self.embed_resolver = Some(resolver);
        self
    }

    /// Renders the whole document. Returns the empty string for an empty
    /// document, otherwise the rendered blocks with a trailing newline.
    pub fn render(&self, document: &Document) -> String {
        let body = match self.config.profile {
            // Email and plain are pass-through profiles until they grow
            // renderers of their own.
            RenderProfile::Html | RenderProfile::Email | RenderProfile::Plain => {
                self.render_blocks(&document.children)
            }
        };
        if body.is_empty() { body } else { body + "\n" }
    }

    fn render_blocks(&self, blocks: &[Block]) -> String {
        let parts: Vec<String> = blocks
            .iter()
            .map(|block| self.render_block(block))
            .filter(|html| !html.is_empty())
            .collect();
        parts.join("\n")
    }

    fn render_block(&self, block: &Block) -> String {
        match block {
            // Front matter is data, not content.
            Block::Frontmatter(_) => String::new(),
            Block::Callout(callout) => self.render_callout(callout),
            Block::Embed(embed) => self.render_embed(embed),
            Block::Paragraph(paragraph) => {
                format!("<p>{}</p>", self.render_inlines(&paragraph.content))
            }
            Block::Heading(heading) => {
                format!(
                    "<h{0}>{1}</h{0}>",
                    heading.level,
                    self.render_inlines(&heading.content)
                )
            }
            Block::List(list) => self.render_list(list),
            Block::BlockQuote(quote) => {
                let body = self.render_blocks(&quote.children);
                if body.is_empty() {
                    "<blockquote>\n</blockquote>".to_string()
                } else {
                    format!("<blockquote>\n{body}\n</blockquote>")
                }
            }
            Block::CodeBlock(code) => render_code_block(code),
            Block::ThematicBreak(_) => "<hr />".to_string(),
        }
    }

    fn render_callout(&self, callout: &CalloutBlock) -> String {
        let mut parts = vec![format!(
            "<aside class=\"callout callout--{}\">",
            escape_html(&callout.kind)
        )];
        if !callout.title.is_empty() {
            parts.push(format!(
                "<div class=\"callout__header\">{}</div>",
                escape_html(&callout.title)
            ));
        }
        let body = self.render_blocks(&callout.children);
        parts.push(format!("<div class=\"callout__body\">\n{body}\n</div>"));
        parts.push("</aside>".to_string());
        parts.join("\n")
    }

    fn render_embed(&self, embed: &EmbedBlock) -> String {
        let resolved_html = self
            .embed_resolver
            .and_then(|resolver| resolver.resolve(&embed.url))
            .and_then(|resolved| resolved.html)
            .filter(|html| !html.is_empty());

        let mut parts = vec!["<figure class=\"embed\">".to_string()];
        match resolved_html {
            Some(html) => parts.push(html),
            None => parts.push(format!(
                "<a class=\"embed__link\" href=\"{0}\">{0}</a>",
                escape_html(&embed.url)
            )),
        }
        if !embed.caption.is_empty() {
            parts.push(format!(
                "<figcaption class=\"embed__caption\">{}</figcaption>",
                escape_html(&embed.caption)
            ));
        }
        parts.push("</figure>".to_string());
        parts.join("\n")
    }

    fn render_list(&self, list: &List) -> String {
        let items: Vec<String> = list
            .items
            .iter()
            .map(|item| self.render_list_item(item, list.tight))
            .collect();
        let body = items.join("\n");
        if !list.ordered {
            format!("<ul>\n{body}\n</ul>")
        } else if list.start == 1 {
            format!("<ol>\n{body}\n</ol>")
        } else {
            format!("<ol start=\"{}\">\n{body}\n</ol>", list.start)
        }
    }

    fn render_list_item(&self, item: &ListItem, tight: bool) -> String {
        let mut parts: Vec<String> = Vec::new();
        let mut last_is_block = false;
        for block in &item.children {
            // Tight lists drop the paragraph wrapper and splice the
            // inline content straight into the <li>.
            if tight && let Block::Paragraph(paragraph) = block {
                parts.push(self.render_inlines(&paragraph.content));
                last_is_block = false;
                continue;
            }
            let html = self.render_block(block);
            if !html.is_empty() {
                parts.push(html);
                last_is_block = true;
            }
        }

        let attrs = match &item.task {
            Some(task) => format!(
                " class=\"{}\" data-task=\"{}\"",
                escape_html(&task.item_class),
                escape_html(&task.state_class)
            ),
            None => String::new(),
        };

        if parts.is_empty() {
            return format!("<li{attrs}></li>");
        }
        let body = parts.join("\n");
        if !tight {
            format!("<li{attrs}>\n{body}\n</li>")
        } else if last_is_block {
            format!("<li{attrs}>{body}\n</li>")
        } else {
            format!("<li{attrs}>{body}</li>")
        }
    }

    fn render_inlines(&self, inlines: &[Inline]) -> String {
        let mut out = String::new();
        for inline in inlines {
            out.push_str(&self.render_inline(inline));
        }
        out
    }

    fn render_inline(&self, inline: &Inline) -> String {
        match inline {
            Inline::Text(text) => escape_html(text),
            Inline::Code(code) => format!("<code>{}</code>", escape_html(code)),
            Inline::Emphasis(children) => {
                format!("<em>{}</em>", self.render_inlines(children))
            }
            Inline::Strong(children) => {
                format!("<strong>{}</strong>", self.render_inlines(children))
            }
            Inline::Strikethrough(children) => {
                format!("<del>{}</del>", self.render_inlines(children))
            }
            Inline::Link {
                url,
                title,
                children,
            } => {
                let body = self.render_inlines(children);
                match title {
                    Some(title) => format!(
                        "<a href=\"{}\" title=\"{}\">{body}</a>",
                        escape_html(url),
                        escape_html(title)
                    ),
                    None => format!("<a href=\"{}\">{body}</a>", escape_html(url)),
                }
            }
            Inline::Image { url, title, alt } => match title {
                Some(title) => format!(
                    "<img src=\"{}\" alt=\"{}\" title=\"{}\" />",
                    escape_html(url),
                    escape_html(alt),
                    escape_html(title)
                ),
                None => format!(
                    "<img src=\"{}\" alt=\"{}\" />",
                    escape_html(url),
                    escape_html(alt)
                ),
            },
            Inline::SoftBreak => "\n".to_string(),
            Inline::HardBreak => "<br />\n".to_string(),
            Inline::TaskMarker(state) => {
                let class = state.css_class();
                format!(
                    "<span class=\"task-marker task-marker--{class}\" title=\"{}\" \
                     data-state=\"{class}\"><span class=\"task-marker__icon\">{}</span></span>",
                    state.label(),
                    state.icon()
                )
            }
            Inline::TaskModifier { key, value } => match value {
                Some(value) => format!(
                    "<span class=\"task-mod task-mod--{key}\" data-key=\"{key}\" \
                     data-value=\"{}\">{}</span>",
                    escape_html(value),
                    escape_html(&format!("//{key}:{value}"))
                ),
                None => format!(
                    "<span class=\"task-mod task-mod--{key}\" data-key=\"{key}\">//{key}</span>"
                ),
            },
            Inline::Mention { identifier } => {
                if let Some(resolver) = self.mention_resolver
                    && let Some(resolved) = resolver.resolve(identifier)
                    && let Some(url) = resolved.url
                {
                    return format!(
                        "<a class=\"mention\" href=\"{}\">@{}</a>",
                        escape_html(&url),
                        escape_html(&resolved.label)
                    );
                }
                format!("<span class=\"mention\">@{}</span>", escape_html(identifier))
            }
            Inline::Hashtag { identifier } => {
                format!("<span class=\"hashtag\">#{}</span>", escape_html(identifier))
            }
        }
    }
}

fn render_code_block(code: &CodeBlock) -> String {
    let language = code
        .info
        .as_deref()
        .and_then(|info| info.split_whitespace().next());
    match language {
        Some(language) => format!(
            "<pre><code class=\"language-{}\">{}</code></pre>",
            escape_html(language),
            escape_html(&code.literal)
        ),
        None => format!("<pre><code>{}</code></pre>", escape_html(&code.literal)),
    }
}

/// Escapes `&`, `<`, `>` and `"` for use in HTML text and attributes.
fn escape_html(text: &str) -> String {
    if !text.contains(['&', '<', '>', '"']) {
        return text.to_string();
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
