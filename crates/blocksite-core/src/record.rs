//! Record types: the unit of published content and the ordered collection.

use std::{
    collections::{BTreeMap, BTreeSet},
    ops::RangeInclusive,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Record validation errors.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The document is not an array of record objects.
    #[error("{0}")]
    Parse(#[from] serde_json::Error),

    /// The collection contains no records.
    #[error("record array is empty")]
    Empty,

    /// A record has `n = 0`.
    #[error("record at index {index} has n = 0, ordinals must be positive")]
    ZeroOrdinal { index: usize },
}

/// One block of content, identified by its ordinal `n`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Ordinal and identifier, starting at 1.
    pub n: u64,

    /// Single-line title.
    #[serde(default)]
    pub title: Option<String>,

    /// Multi-line body, rendered verbatim.
    #[serde(default)]
    pub body: Option<String>,

    /// Optional part label shown next to the ordinal.
    #[serde(default)]
    pub part: Option<String>,

    /// Optional chapter label shown next to the ordinal.
    #[serde(default)]
    pub chapter: Option<String>,
}

impl ContentRecord {
    /// Create a record with only an ordinal.
    #[must_use]
    pub fn new(n: u64) -> Self {
        Self {
            n,
            title: None,
            body: None,
            part: None,
            chapter: None,
        }
    }

    /// Set the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Title, or `""` when absent.
    #[must_use]
    pub fn title_or_empty(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// Body, or `""` when absent.
    #[must_use]
    pub fn body_or_empty(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }

    /// Index of the previous record, clamped at 1.
    #[must_use]
    pub fn prev(&self) -> u64 {
        self.n.saturating_sub(1).max(1)
    }

    /// Index of the next record, clamped at `total_count`.
    #[must_use]
    pub fn next(&self, total_count: u64) -> u64 {
        self.n.saturating_add(1).min(total_count)
    }
}

/// Ordered, non-empty sequence of records loaded for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordCollection {
    records: Vec<ContentRecord>,
}

impl RecordCollection {
    /// Build a collection, rejecting empty input and zero ordinals.
    pub fn new(records: Vec<ContentRecord>) -> Result<Self, RecordError> {
        if records.is_empty() {
            return Err(RecordError::Empty);
        }

        if let Some(index) = records.iter().position(|r| r.n == 0) {
            return Err(RecordError::ZeroOrdinal { index });
        }

        Ok(Self { records })
    }

    /// Parse a JSON array of records.
    pub fn from_json_str(json: &str) -> Result<Self, RecordError> {
        let records: Vec<ContentRecord> = serde_json::from_str(json)?;
        Self::new(records)
    }

    /// Number of records, used as the pagination upper bound.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.records.len() as u64
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in collection order.
    #[must_use]
    pub fn records(&self) -> &[ContentRecord] {
        &self.records
    }

    /// Iterate records in collection order.
    pub fn iter(&self) -> std::slice::Iter<'_, ContentRecord> {
        self.records.iter()
    }

    /// Ordinals that occur more than once, ascending.
    #[must_use]
    pub fn duplicates(&self) -> Vec<u64> {
        let mut counts: BTreeMap<u64, usize> = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.n).or_default() += 1;
        }
        counts
            .into_iter()
            .filter_map(|(n, count)| (count > 1).then_some(n))
            .collect()
    }

    /// Missing ordinal ranges between 1 and the largest `n`.
    ///
    /// Pagination is arithmetic on `n`, so any gap means a prev/next link can
    /// point at a block that does not exist.
    #[must_use]
    pub fn gaps(&self) -> Vec<RangeInclusive<u64>> {
        let present: BTreeSet<u64> = self.records.iter().map(|r| r.n).collect();
        let mut gaps = Vec::new();
        let mut expected = 1;

        for n in present {
            if n > expected {
                gaps.push(expected..=n - 1);
            }
            match n.checked_add(1) {
                Some(next) => expected = next,
                None => break,
            }
        }

        gaps
    }
}

impl<'a> IntoIterator for &'a RecordCollection {
    type Item = &'a ContentRecord;
    type IntoIter = std::slice::Iter<'a, ContentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
