//! Time spans, indexed phrase spans and exported chunks

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Half-open time interval `[start_ms, end_ms)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Start time in milliseconds
    pub start_ms: u64,
    /// End time in milliseconds (exclusive)
    pub end_ms: u64,
}

impl Span {
    /// Create new span. `start_ms` must be below `end_ms`.
    pub fn new(start_ms: u64, end_ms: u64) -> Self {
        debug_assert!(start_ms < end_ms, "empty span {start_ms}..{end_ms}");
        Self { start_ms, end_ms }
    }

    /// Create a span, or `None` when it would be empty
    pub fn non_empty(start_ms: u64, end_ms: u64) -> Option<Self> {
        (start_ms < end_ms).then_some(Self { start_ms, end_ms })
    }

    pub fn duration_ms(&self) -> u64 {
        self.end_ms - self.start_ms
    }

    /// Whether `other` lies entirely inside this span
    pub fn contains(&self, other: &Span) -> bool {
        self.start_ms <= other.start_ms && other.end_ms <= self.end_ms
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start_ms < other.end_ms && other.start_ms < self.end_ms
    }
}

/// A phrase span with its 1-based chronological index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseSpan {
    pub index: usize,
    #[serde(flatten)]
    pub span: Span,
}

impl PhraseSpan {
    pub fn new(index: usize, span: Span) -> Self {
        Self { index, span }
    }

    pub fn start_ms(&self) -> u64 {
        self.span.start_ms
    }

    pub fn end_ms(&self) -> u64 {
        self.span.end_ms
    }

    pub fn duration_ms(&self) -> u64 {
        self.span.duration_ms()
    }
}

/// A phrase written to disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedChunk {
    #[serde(flatten)]
    pub phrase: PhraseSpan,
    pub path: PathBuf,
}

impl ExportedChunk {
    pub fn index(&self) -> usize {
        self.phrase.index
    }

    pub fn duration_ms(&self) -> u64 {
        self.phrase.duration_ms()
    }
}
