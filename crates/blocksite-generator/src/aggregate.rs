//! Aggregation of rendered blocks into the site manifest.
//!
//! This is the join point of the pipeline: it needs every rendered block
//! before it can emit the index and the sitemap.

use std::collections::BTreeMap;

use blocksite_core::{Config, RecordCollection};
use tracing::{debug, warn};

use crate::{
    artifact::{ArtifactDescriptor, Manifest},
    html::{BlockRenderer, RenderedBlock, Result},
    robots::RobotsGenerator,
    routes,
    sitemap::SitemapGenerator,
};

/// Combines per-record output with collection-level artifacts.
#[derive(Debug)]
pub struct Aggregator {
    config: Config,
    passthrough: Vec<ArtifactDescriptor>,
}

impl Aggregator {
    /// Create a new aggregator.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            passthrough: Vec::new(),
        }
    }

    /// Add files copied verbatim into the output root.
    #[must_use]
    pub fn with_passthrough(mut self, files: Vec<ArtifactDescriptor>) -> Self {
        self.passthrough = files;
        self
    }

    /// Build the manifest.
    ///
    /// `rendered` must be in collection order; it drives the index listing.
    /// Per-record artifacts are ordered by `n`. When an ordinal repeats, the
    /// last record with that ordinal owns its output paths.
    pub fn aggregate(
        &self,
        records: &RecordCollection,
        renderer: &BlockRenderer,
        rendered: Vec<RenderedBlock>,
    ) -> Result<Manifest> {
        let mut manifest = Manifest::new();

        let index_html = if self.config.build.crawlable_index {
            let entries: Vec<&str> = rendered.iter().map(|b| b.index_entry.as_str()).collect();
            Some(renderer.render_index(&entries)?)
        } else {
            None
        };

        let mut by_ordinal = BTreeMap::new();
        for block in rendered {
            if let Some(previous) = by_ordinal.insert(block.n, block) {
                warn!(n = previous.n, "duplicate block ordinal, keeping the last one");
            }
        }
        for block in by_ordinal.into_values() {
            manifest.push_record(block.page);
            manifest.push_record(block.text);
        }

        if let Some(html) = index_html {
            manifest.push_collection(ArtifactDescriptor::html(routes::INDEX_PATH, html));
        }

        let sitemap = SitemapGenerator::new(self.config.clone()).generate(records);
        manifest.push_collection(ArtifactDescriptor::xml(routes::SITEMAP_PATH, sitemap));

        let has_robots = self
            .passthrough
            .iter()
            .any(|a| a.path() == routes::ROBOTS_PATH);
        if !has_robots
            && let Some(robots) = RobotsGenerator::new(self.config.clone()).generate()
        {
            manifest.push_collection(robots);
        }

        // Passthrough files may replace the generated robots.txt, nothing else.
        for file in &self.passthrough {
            if manifest.get(file.path()).is_some() {
                warn!(
                    path = file.path(),
                    "passthrough file collides with a generated artifact, skipping"
                );
                continue;
            }
            manifest.push_collection(file.clone());
        }

        debug!(
            records = manifest.record_artifacts().len(),
            collection = manifest.collection_artifacts().len(),
            "aggregated manifest"
        );
        Ok(manifest)
    }
}

#[cfg(test)]
mod tests {
    use blocksite_core::ContentRecord;

    use super::*;

    fn test_config() -> Config {
        let mut config = Config::default();
        config.site.base_url = "https://example.com".to_string();
        config
    }

    fn build(config: &Config, records: &RecordCollection) -> Manifest {
        let renderer = BlockRenderer::new(config.clone(), records.total_count());
        let rendered = records
            .iter()
            .map(|r| renderer.render(r).unwrap())
            .collect();
        Aggregator::new(config.clone())
            .aggregate(records, &renderer, rendered)
            .unwrap()
    }

    #[test]
    fn test_manifest_contents() {
        let config = test_config();
        let records = RecordCollection::new(vec![
            ContentRecord::new(2).with_title("Two"),
            ContentRecord::new(1).with_title("One"),
        ])
        .unwrap();

        let manifest = build(&config, &records);

        let record_paths: Vec<_> = manifest
            .record_artifacts()
            .iter()
            .map(ArtifactDescriptor::path)
            .collect();
        assert_eq!(
            record_paths,
            vec![
                "block/1/index.html",
                "raw/1.txt",
                "block/2/index.html",
                "raw/2.txt"
            ]
        );

        let collection_paths: Vec<_> = manifest
            .collection_artifacts()
            .iter()
            .map(ArtifactDescriptor::path)
            .collect();
        assert_eq!(collection_paths, vec!["index/index.html", "sitemap.xml"]);
        assert_eq!(manifest.len(), 6);
    }

    #[test]
    fn test_index_follows_collection_order() {
        let config = test_config();
        let records = RecordCollection::new(vec![
            ContentRecord::new(2).with_title("Two"),
            ContentRecord::new(1).with_title("One"),
        ])
        .unwrap();

        let manifest = build(&config, &records);
        let index = manifest.get("index/index.html").unwrap().as_str().unwrap();

        let two = index.find("Block 2").unwrap();
        let one = index.find("Block 1").unwrap();
        assert!(two < one);
    }

    #[test]
    fn test_no_index_when_disabled() {
        let mut config = test_config();
        config.build.crawlable_index = false;
        let records = RecordCollection::new(vec![ContentRecord::new(1)]).unwrap();

        let manifest = build(&config, &records);

        assert!(manifest.get("index/index.html").is_none());
        assert!(manifest.get("sitemap.xml").is_some());
    }

    #[test]
    fn test_duplicate_ordinal_last_wins() {
        let config = test_config();
        let records = RecordCollection::new(vec![
            ContentRecord::new(1).with_title("first"),
            ContentRecord::new(1).with_title("second"),
        ])
        .unwrap();

        let manifest = build(&config, &records);

        assert_eq!(manifest.record_artifacts().len(), 2);
        assert_eq!(manifest.get("raw/1.txt").unwrap().content(), b"second\n\n\n");
    }

    #[test]
    fn test_robots_and_passthrough() {
        let mut config = test_config();
        config.robots.enabled = true;
        let records = RecordCollection::new(vec![ContentRecord::new(1)]).unwrap();
        let renderer = BlockRenderer::new(config.clone(), 1);
        let rendered = vec![renderer.render(&records.records()[0]).unwrap()];

        let manifest = Aggregator::new(config.clone())
            .with_passthrough(vec![ArtifactDescriptor::text("llms.txt", "hello\n")])
            .aggregate(&records, &renderer, rendered.clone())
            .unwrap();
        let robots = manifest.get("robots.txt").unwrap().as_str().unwrap();
        assert!(robots.contains("Sitemap:"));
        assert_eq!(manifest.get("llms.txt").unwrap().content(), b"hello\n");

        let manifest = Aggregator::new(config)
            .with_passthrough(vec![ArtifactDescriptor::text("robots.txt", "custom\n")])
            .aggregate(&records, &renderer, rendered)
            .unwrap();
        let robots: Vec<_> = manifest
            .iter()
            .filter(|a| a.path() == "robots.txt")
            .collect();
        assert_eq!(robots.len(), 1);
        assert_eq!(robots[0].content(), b"custom\n");
    }

    #[test]
    fn test_passthrough_never_replaces_generated_pages() {
        let config = test_config();
        let records = RecordCollection::new(vec![ContentRecord::new(1)]).unwrap();
        let renderer = BlockRenderer::new(config.clone(), 1);
        let rendered = vec![renderer.render(&records.records()[0]).unwrap()];

        let manifest = Aggregator::new(config)
            .with_passthrough(vec![
                ArtifactDescriptor::text("sitemap.xml", "stale\n"),
                ArtifactDescriptor::text("raw/1.txt", "stale\n"),
                ArtifactDescriptor::text("index/index.html", "stale\n"),
                ArtifactDescriptor::text("llms.txt", "hello\n"),
            ])
            .aggregate(&records, &renderer, rendered)
            .unwrap();

        assert_eq!(manifest.len(), 5);
        for path in ["sitemap.xml", "raw/1.txt", "index/index.html"] {
            let matching: Vec<_> = manifest.iter().filter(|a| a.path() == path).collect();
            assert_eq!(matching.len(), 1, "{path} should appear once");
            assert_ne!(matching[0].content(), b"stale\n");
        }
        assert!(manifest.get("llms.txt").is_some());
    }
}
