//! Publishing the manifest to the output directory.
//!
//! Per-record artifacts are written in parallel, collection artifacts only
//! after all of them succeeded. The first failure aborts the run; files
//! written before it stay on disk.

use std::{
    fs,
    io::Write,
    path::{Component, Path, PathBuf},
};

use rayon::prelude::*;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info};

use crate::artifact::{ArtifactDescriptor, Manifest};

/// Publishing errors.
#[derive(Debug, Error)]
pub enum PublishError {
    /// An artifact could not be persisted.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An artifact path escapes the output directory.
    #[error("invalid artifact path: {0}")]
    InvalidPath(String),
}

/// Result type for publishing.
pub type Result<T> = std::result::Result<T, PublishError>;

/// Publishing statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishStats {
    /// Number of files written.
    pub files: usize,

    /// Total bytes written.
    pub bytes: u64,
}

/// Writes manifests to a directory tree.
#[derive(Debug, Clone)]
pub struct Publisher {
    output_dir: PathBuf,
    atomic_writes: bool,
}

impl Publisher {
    /// Create a publisher rooted at `output_dir`, with atomic writes enabled.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            atomic_writes: true,
        }
    }

    /// Enable or disable staging each file through a temporary file.
    #[must_use]
    pub fn with_atomic_writes(mut self, atomic_writes: bool) -> Self {
        self.atomic_writes = atomic_writes;
        self
    }

    /// Write every artifact in the manifest.
    pub fn publish(&self, manifest: &Manifest) -> Result<PublishStats> {
        for artifact in manifest.iter() {
            self.resolve(artifact.path())?;
        }

        info!(
            output = %self.output_dir.display(),
            files = manifest.len(),
            "publishing"
        );

        fs::create_dir_all(&self.output_dir).map_err(|source| PublishError::Write {
            path: self.output_dir.clone(),
            source,
        })?;

        manifest
            .record_artifacts()
            .par_iter()
            .try_for_each(|artifact| self.write(artifact))?;

        for artifact in manifest.collection_artifacts() {
            self.write(artifact)?;
        }

        let stats = PublishStats {
            files: manifest.len(),
            bytes: manifest.iter().map(|a| a.content().len() as u64).sum(),
        };
        info!(files = stats.files, bytes = stats.bytes, "publish complete");
        Ok(stats)
    }

    /// Map a relative artifact path into the output directory.
    fn resolve(&self, relative: &str) -> Result<PathBuf> {
        let path = Path::new(relative);
        let is_plain = !relative.is_empty()
            && path
                .components()
                .all(|component| matches!(component, Component::Normal(_)));

        if !is_plain {
            return Err(PublishError::InvalidPath(relative.to_string()));
        }

        Ok(self.output_dir.join(path))
    }

    /// Write one artifact, creating parent directories.
    fn write(&self, artifact: &ArtifactDescriptor) -> Result<()> {
        let path = self.resolve(artifact.path())?;
        let write_error = |source: std::io::Error| PublishError::Write {
            path: path.clone(),
            source,
        };

        let parent = path.parent().unwrap_or(&self.output_dir);
        fs::create_dir_all(parent).map_err(write_error)?;

        if self.atomic_writes {
            let mut staged = NamedTempFile::new_in(parent).map_err(write_error)?;
            staged
                .write_all(artifact.content())
                .map_err(write_error)?;
            set_public_permissions(staged.path()).map_err(write_error)?;
            staged.persist(&path).map_err(|e| write_error(e.error))?;
        } else {
            fs::write(&path, artifact.content()).map_err(write_error)?;
        }

        debug!(path = %path.display(), "wrote artifact");
        Ok(())
    }
}

/// Temporary files are created owner-only; published files must be readable.
#[cfg(unix)]
fn set_public_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_public_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
