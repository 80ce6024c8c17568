//! HTML and plain-text rendering for blocks.
//!
//! Rendering is pure: a record plus the collection size always produces the
//! same artifacts, and nothing here touches the filesystem.

use blocksite_core::{Config, ContentRecord};
use thiserror::Error;
use tracing::trace;

use crate::{
    artifact::ArtifactDescriptor,
    routes,
    template::{TemplateContext, TemplateError, TemplateRegistry},
};

/// HTML generation errors.
#[derive(Debug, Error)]
pub enum HtmlError {
    /// Template error.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),
}

/// Result type for HTML generation.
pub type Result<T> = std::result::Result<T, HtmlError>;

/// Everything one record contributes to the site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBlock {
    /// Ordinal of the source record.
    pub n: u64,

    /// Detail page at `block/{n}/index.html`.
    pub page: ArtifactDescriptor,

    /// Plain-text mirror at `raw/{n}.txt`.
    pub text: ArtifactDescriptor,

    /// `<li>` fragment for the collection index.
    pub index_entry: String,
}

/// Renders blocks and the index page.
#[derive(Debug)]
pub struct BlockRenderer {
    templates: TemplateRegistry,
    config: Config,
    total_count: u64,
}

impl BlockRenderer {
    /// Create a renderer for a collection of `total_count` records.
    #[must_use]
    pub fn new(config: Config, total_count: u64) -> Self {
        Self {
            templates: TemplateRegistry::new(),
            config,
            total_count,
        }
    }

    /// Create a renderer with custom templates.
    #[must_use]
    pub fn with_templates(config: Config, total_count: u64, templates: TemplateRegistry) -> Self {
        Self {
            templates,
            config,
            total_count,
        }
    }

    /// Render the detail page, text mirror and index entry for one record.
    pub fn render(&self, record: &ContentRecord) -> Result<RenderedBlock> {
        trace!(n = record.n, "rendering block");

        Ok(RenderedBlock {
            n: record.n,
            page: ArtifactDescriptor::html(routes::block_path(record.n), self.render_page(record)?),
            text: ArtifactDescriptor::text(routes::raw_path(record.n), plain_text(record)),
            index_entry: self.render_index_entry(record)?,
        })
    }

    /// Render the detail page HTML.
    pub fn render_page(&self, record: &ContentRecord) -> Result<String> {
        let base = self.config.base_url();
        let n = record.n;

        let index_url = if self.config.build.crawlable_index {
            routes::index_url(base)
        } else {
            routes::viewer_index_url(base)
        };

        let ctx = TemplateContext::new()
            .with_var(
                "page_title",
                format!("{} — Block {n}", escape_attr(&self.config.site.title)),
            )
            .with_var("canonical_url", routes::block_url(base, n))
            .with_var("kicker", kicker(record))
            .with_var("title", escape_html(record.title_or_empty()))
            .with_var("body", escape_html(record.body_or_empty()))
            .with_var("index_url", index_url)
            .with_var("prev_url", routes::block_url(base, record.prev()))
            .with_var("next_url", routes::block_url(base, record.next(self.total_count)))
            .with_var("raw_url", routes::raw_url(base, n));

        Ok(self.templates.render("block", &ctx)?)
    }

    /// Render the `<li>` entry linking a record from the index.
    pub fn render_index_entry(&self, record: &ContentRecord) -> Result<String> {
        let base = self.config.base_url();
        let ctx = TemplateContext::new()
            .with_var("n", record.n.to_string())
            .with_var("block_url", routes::block_url(base, record.n))
            .with_var("title", escape_html(record.title_or_empty()))
            .with_var("raw_url", routes::raw_url(base, record.n));

        Ok(self.templates.render("index_entry", &ctx)?)
    }

    /// Render the index page from entries in collection order.
    pub fn render_index<S: AsRef<str>>(&self, entries: &[S]) -> Result<String> {
        let site_title = escape_attr(&self.config.site.title);
        let description = match &self.config.site.description {
            Some(desc) => escape_attr(desc),
            None => format!("{site_title} — crawlable index of all blocks."),
        };
        let items = entries
            .iter()
            .map(|entry| entry.as_ref())
            .collect::<Vec<&str>>()
            .join("\n");

        let ctx = TemplateContext::new()
            .with_var("page_title", format!("{site_title} — Index"))
            .with_var("description", description)
            .with_var("canonical_url", routes::index_url(self.config.base_url()))
            .with_var("site_title", site_title)
            .with_var("count", entries.len().to_string())
            .with_var("items", items);

        Ok(self.templates.render("index", &ctx)?)
    }
}

/// Plain-text mirror: title, blank line, body, trailing newline. Never escaped.
#[must_use]
pub fn plain_text(record: &ContentRecord) -> String {
    format!("{}\n\n{}\n", record.title_or_empty(), record.body_or_empty())
}

/// Escape `&`, `<` and `>` for HTML text content.
#[must_use]
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape text for a double-quoted attribute value.
fn escape_attr(s: &str) -> String {
    escape_html(s).replace('"', "&quot;")
}

/// `Block n • part • chapter`, skipping blank labels.
fn kicker(record: &ContentRecord) -> String {
    let mut kicker = format!("Block {}", record.n);
    for label in [&record.part, &record.chapter].into_iter().flatten() {
        let label = label.trim();
        if !label.is_empty() {
            kicker.push_str(" • ");
            kicker.push_str(&escape_html(label));
        }
    }
    kicker
}
