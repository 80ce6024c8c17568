//! Sitemap generation.
//!
//! Generates the sitemap-protocol document listing every crawlable URL.

use std::collections::BTreeSet;

use blocksite_core::{Config, RecordCollection};
use tracing::debug;

use crate::routes;

/// A sitemap URL entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapUrl {
    /// URL location.
    pub loc: String,
}

impl SitemapUrl {
    fn new(loc: String) -> Self {
        Self { loc }
    }
}

/// Sitemap generator.
#[derive(Debug)]
pub struct SitemapGenerator {
    config: Config,
}

impl SitemapGenerator {
    /// Create a new sitemap generator.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Crawlable URLs for a collection.
    ///
    /// Order: site root, index (when enabled), detail pages ascending by `n`,
    /// then text mirrors ascending by `n`. Duplicate ordinals yield one entry.
    #[must_use]
    pub fn urls(&self, records: &RecordCollection) -> Vec<SitemapUrl> {
        let base = self.config.base_url();
        let ordinals: BTreeSet<u64> = records.iter().map(|r| r.n).collect();

        let mut urls = Vec::with_capacity(2 + 2 * ordinals.len());
        urls.push(SitemapUrl::new(routes::root_url(base)));
        if self.config.build.crawlable_index {
            urls.push(SitemapUrl::new(routes::index_url(base)));
        }
        urls.extend(
            ordinals
                .iter()
                .map(|&n| SitemapUrl::new(routes::block_url(base, n))),
        );
        urls.extend(
            ordinals
                .iter()
                .map(|&n| SitemapUrl::new(routes::raw_url(base, n))),
        );
        urls
    }

    /// Generate sitemap XML for a collection.
    #[must_use]
    pub fn generate(&self, records: &RecordCollection) -> String {
        let urls = self.urls(records);
        debug!(count = urls.len(), "generating sitemap");
        render_urlset(&urls)
    }
}

/// Serialize URL entries as a `<urlset>`, one `<url>` per line.
#[must_use]
pub fn render_urlset(urls: &[SitemapUrl]) -> String {
    let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
    xml.push('\n');

    for url in urls {
        xml.push_str(&format!("  <url><loc>{}</loc></url>\n", escape_xml(&url.loc)));
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
