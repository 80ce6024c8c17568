//! Artifact descriptors and the per-run manifest.

use std::fmt;

/// Kind of content an artifact holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// HTML document.
    Html,
    /// Plain UTF-8 text.
    PlainText,
    /// XML document.
    Xml,
}

impl ContentType {
    /// MIME type string.
    #[must_use]
    pub fn mime(&self) -> &'static str {
        match self {
            Self::Html => "text/html; charset=utf-8",
            Self::PlainText => "text/plain; charset=utf-8",
            Self::Xml => "application/xml",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime())
    }
}

/// One output file: a relative path, its content and its type.
///
/// Paths use `/` separators and are relative to the output root. Content is
/// raw bytes so passthrough files are written exactly as read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactDescriptor {
    path: String,
    content: Vec<u8>,
    content_type: ContentType,
}

impl ArtifactDescriptor {
    /// Create a new artifact.
    #[must_use]
    pub fn new(
        path: impl Into<String>,
        content: impl Into<Vec<u8>>,
        content_type: ContentType,
    ) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            content_type,
        }
    }

    /// Create an HTML artifact.
    #[must_use]
    pub fn html(path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self::new(path, content, ContentType::Html)
    }

    /// Create a plain-text artifact.
    #[must_use]
    pub fn text(path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self::new(path, content, ContentType::PlainText)
    }

    /// Create an XML artifact.
    #[must_use]
    pub fn xml(path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self::new(path, content, ContentType::Xml)
    }

    /// Relative output path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// File content.
    #[must_use]
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// File content as text, if it is valid UTF-8.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.content).ok()
    }

    /// Content type.
    #[must_use]
    pub fn content_type(&self) -> ContentType {
        self.content_type
    }
}

/// Every artifact produced by one build.
///
/// Per-record artifacts are written before collection artifacts so that the
/// index and sitemap never reference pages that do not exist yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    record_artifacts: Vec<ArtifactDescriptor>,
    collection_artifacts: Vec<ArtifactDescriptor>,
}

impl Manifest {
    /// Create an empty manifest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a per-record artifact.
    pub fn push_record(&mut self, artifact: ArtifactDescriptor) {
        self.record_artifacts.push(artifact);
    }

    /// Append a collection-level artifact.
    pub fn push_collection(&mut self, artifact: ArtifactDescriptor) {
        self.collection_artifacts.push(artifact);
    }

    /// Per-record artifacts, ascending by ordinal.
    #[must_use]
    pub fn record_artifacts(&self) -> &[ArtifactDescriptor] {
        &self.record_artifacts
    }

    /// Collection-level artifacts (index, sitemap, robots, passthrough).
    #[must_use]
    pub fn collection_artifacts(&self) -> &[ArtifactDescriptor] {
        &self.collection_artifacts
    }

    /// Iterate all artifacts in write order.
    pub fn iter(&self) -> impl Iterator<Item = &ArtifactDescriptor> {
        self.record_artifacts
            .iter()
            .chain(self.collection_artifacts.iter())
    }

    /// Look up an artifact by path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&ArtifactDescriptor> {
        self.iter().find(|a| a.path() == path)
    }

    /// Total number of artifacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.record_artifacts.len() + self.collection_artifacts.len()
    }

    /// Whether the manifest holds no artifacts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
