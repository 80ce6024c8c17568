//! Output paths and canonical URLs.
//!
//! Paths are relative to the output root; URLs are absolute under the
//! configured base URL.

/// Output path of the crawlable index.
pub const INDEX_PATH: &str = "index/index.html";

/// Output path of the sitemap.
pub const SITEMAP_PATH: &str = "sitemap.xml";

/// Output path of robots.txt.
pub const ROBOTS_PATH: &str = "robots.txt";

/// Output path of a block's detail page.
#[must_use]
pub fn block_path(n: u64) -> String {
    format!("block/{n}/index.html")
}

/// Output path of a block's plain-text mirror.
#[must_use]
pub fn raw_path(n: u64) -> String {
    format!("raw/{n}.txt")
}

/// Canonical URL of the site root.
#[must_use]
pub fn root_url(base_url: &str) -> String {
    format!("{base_url}/")
}

/// Canonical URL of the crawlable index.
#[must_use]
pub fn index_url(base_url: &str) -> String {
    format!("{base_url}/index/")
}

/// Viewer anchor used in place of the index route when it is disabled.
#[must_use]
pub fn viewer_index_url(base_url: &str) -> String {
    format!("{base_url}/#index")
}

/// Canonical URL of a block's detail page.
#[must_use]
pub fn block_url(base_url: &str, n: u64) -> String {
    format!("{base_url}/block/{n}/")
}

/// URL of a block's plain-text mirror.
#[must_use]
pub fn raw_url(base_url: &str, n: u64) -> String {
    format!("{base_url}/raw/{n}.txt")
}
