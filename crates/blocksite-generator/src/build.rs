//! Build orchestration.
//!
//! Coordinates the full site build: load, render, aggregate, publish.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use blocksite_core::{Config, JsonRecordStore, RecordCollection, SourceError};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    aggregate::Aggregator,
    artifact::{ArtifactDescriptor, Manifest},
    html::{BlockRenderer, HtmlError},
    publish::{PublishError, Publisher},
};

/// Build errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The record source is missing or invalid.
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    /// HTML generation error.
    #[error("HTML error: {0}")]
    Html(#[from] HtmlError),

    /// Writing the output failed.
    #[error("publish error: {0}")]
    Publish(#[from] PublishError),

    /// A passthrough file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Passthrough {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Build statistics.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// Number of records loaded.
    pub records: usize,

    /// Number of per-record artifacts (detail pages and text mirrors).
    pub record_artifacts: usize,

    /// Number of collection artifacts (index, sitemap, robots, passthrough).
    pub collection_artifacts: usize,

    /// Total number of files written.
    pub artifacts: usize,

    /// Total bytes written.
    pub bytes: u64,

    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

/// Site builder that orchestrates the build process.
#[derive(Debug)]
pub struct Builder {
    config: Config,
    source: PathBuf,
    output_dir: PathBuf,
}

impl Builder {
    /// Create a builder using the source and output paths from `config`.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let source = config.build.source.clone();
        let output_dir = config.build.output_dir.clone();
        Self {
            config,
            source,
            output_dir,
        }
    }

    /// Override the source document path.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = source.into();
        self
    }

    /// Override the output directory.
    #[must_use]
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Execute the full build process.
    pub fn build(&self) -> Result<BuildStats> {
        let start = Instant::now();

        info!(
            source = %self.source.display(),
            output = %self.output_dir.display(),
            "starting build"
        );

        // 1. Load records; nothing is written if this fails
        let store = JsonRecordStore::new(&self.source);
        let records = store.load()?;
        self.warn_on_irregular_ordinals(&records);

        // 2. Render and aggregate
        let passthrough = self.read_passthrough(store.base_dir())?;
        let manifest = self.render_manifest(&records, passthrough)?;

        // 3. Publish
        let publisher =
            Publisher::new(&self.output_dir).with_atomic_writes(self.config.build.atomic_writes);
        let published = publisher.publish(&manifest)?;

        let stats = BuildStats {
            records: records.len(),
            record_artifacts: manifest.record_artifacts().len(),
            collection_artifacts: manifest.collection_artifacts().len(),
            artifacts: published.files,
            bytes: published.bytes,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            records = stats.records,
            artifacts = stats.artifacts,
            duration_ms = stats.duration_ms,
            "build complete"
        );

        Ok(stats)
    }

    /// Render every record in parallel and aggregate the results.
    ///
    /// Pure apart from logging: the same records always yield the same manifest.
    pub fn render_manifest(
        &self,
        records: &RecordCollection,
        passthrough: Vec<ArtifactDescriptor>,
    ) -> Result<Manifest> {
        let renderer = BlockRenderer::new(self.config.clone(), records.total_count());

        info!(count = records.len(), "rendering blocks");

        let rendered = records
            .records()
            .par_iter()
            .map(|record| renderer.render(record))
            .collect::<std::result::Result<Vec<_>, HtmlError>>()?;

        let manifest = Aggregator::new(self.config.clone())
            .with_passthrough(passthrough)
            .aggregate(records, &renderer, rendered)?;

        Ok(manifest)
    }

    /// Read configured passthrough files that exist next to the source.
    fn read_passthrough(&self, base_dir: &Path) -> Result<Vec<ArtifactDescriptor>> {
        let mut files = Vec::new();

        for name in &self.config.build.passthrough {
            let path = base_dir.join(name);
            if !path.is_file() {
                debug!(path = %path.display(), "passthrough file not present, skipping");
                continue;
            }

            let content = fs::read(&path).map_err(|source| BuildError::Passthrough {
                path: path.clone(),
                source,
            })?;
            debug!(path = %path.display(), "copying passthrough file");
            files.push(ArtifactDescriptor::text(name.as_str(), content));
        }

        Ok(files)
    }

    fn warn_on_irregular_ordinals(&self, records: &RecordCollection) {
        let duplicates = records.duplicates();
        if !duplicates.is_empty() {
            warn!(?duplicates, "duplicate block ordinals, later records win");
        }

        let gaps = records.gaps();
        if !gaps.is_empty() {
            warn!(
                ?gaps,
                "block ordinals are not contiguous, prev/next links may point to missing blocks"
            );
        }
    }
}
