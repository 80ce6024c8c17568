//! Robots.txt generation.
//!
//! Generates the robots.txt file for search engine crawlers.

use blocksite_core::Config;
use tracing::info;

use crate::{artifact::ArtifactDescriptor, routes};

/// Robots.txt generator.
#[derive(Debug)]
pub struct RobotsGenerator {
    config: Config,
}

impl RobotsGenerator {
    /// Create a new robots generator.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Generate the robots.txt artifact, or `None` when disabled.
    #[must_use]
    pub fn generate(&self) -> Option<ArtifactDescriptor> {
        if !self.config.robots.enabled {
            return None;
        }

        info!("generating robots.txt");

        let mut out = String::from("User-agent: *\n");

        for path in &self.config.robots.disallow {
            out.push_str(&format!("Disallow: {path}\n"));
        }

        for path in &self.config.robots.allow {
            out.push_str(&format!("Allow: {path}\n"));
        }

        out.push_str(&format!(
            "Sitemap: {}\n",
            self.config.url_for(routes::SITEMAP_PATH)
        ));

        Some(ArtifactDescriptor::text(routes::ROBOTS_PATH, out))
    }
}
