//! Run reports and the optional phrase manifest

use chrono::{DateTime, Utc};
use pb_common::human_time::format_duration_ms;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::models::{ExportedChunk, OutputFormat};
use crate::services::ExportOutcome;

/// One written chunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkSummary {
    pub index: usize,
    pub path: PathBuf,
    pub start_ms: u64,
    pub end_ms: u64,
    pub duration_ms: u64,
}

impl From<&ExportedChunk> for ChunkSummary {
    fn from(chunk: &ExportedChunk) -> Self {
        Self {
            index: chunk.index(),
            path: chunk.path.clone(),
            start_ms: chunk.phrase.start_ms(),
            end_ms: chunk.phrase.end_ms(),
            duration_ms: chunk.duration_ms(),
        }
    }
}

/// One chunk that could not be written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkFailure {
    pub index: usize,
    pub path: PathBuf,
    pub reason: String,
}

/// Summary of one pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitReport {
    pub input: PathBuf,
    pub sample_rate: u32,
    pub channels: u16,
    pub duration_ms: u64,
    pub output_format: OutputFormat,
    /// Phrases found by the segmenter
    pub phrase_count: usize,
    pub written: Vec<ChunkSummary>,
    pub failed: Vec<ChunkFailure>,
    /// Manifest path, when one was requested and written
    pub manifest: Option<PathBuf>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SplitReport {
    /// True when every phrase was written; zero phrases is complete
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub(crate) fn record_outcome(&mut self, outcome: &ExportOutcome) {
        self.written = outcome.written.iter().map(ChunkSummary::from).collect();
        self.failed = outcome
            .failed
            .iter()
            .map(|e| ChunkFailure {
                index: e.index,
                path: e.path.clone(),
                reason: e.source.to_string(),
            })
            .collect();
    }
}

impl fmt::Display for SplitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Found {} phrase{}!",
            self.phrase_count,
            if self.phrase_count == 1 { "" } else { "s" }
        )?;
        for chunk in &self.written {
            writeln!(
                f,
                "Exported: {} ({})",
                chunk.path.display(),
                format_duration_ms(chunk.duration_ms)
            )?;
        }
        for failure in &self.failed {
            writeln!(
                f,
                "Failed: phrase {} -> {}: {}",
                failure.index,
                failure.path.display(),
                failure.reason
            )?;
        }
        if let Some(manifest) = &self.manifest {
            writeln!(f, "Manifest: {}", manifest.display())?;
        }
        write!(
            f,
            "Done! {} of {} chunks written",
            self.written.len(),
            self.phrase_count
        )?;
        if !self.failed.is_empty() {
            write!(f, ", {} failed", self.failed.len())?;
        }
        Ok(())
    }
}

/// Manifest entry, paths relative to the output directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub index: usize,
    pub file: String,
    pub start_ms: u64,
    pub end_ms: u64,
    pub duration_ms: u64,
}

/// Manifest listing every written phrase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub source: String,
    pub phrases: Vec<ManifestEntry>,
}

/// Manifest file name for `base_name`: `phrase` → `phrases.json`
pub fn manifest_file_name(base_name: &str) -> String {
    format!("{base_name}s.json")
}

impl Manifest {
    pub fn from_chunks(source: &Path, chunks: &[ExportedChunk]) -> Self {
        Self {
            source: source
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            phrases: chunks
                .iter()
                .map(|c| ManifestEntry {
                    index: c.index(),
                    file: c
                        .path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default(),
                    start_ms: c.phrase.start_ms(),
                    end_ms: c.phrase.end_ms(),
                    duration_ms: c.duration_ms(),
                })
                .collect(),
        }
    }

    /// Write pretty JSON to `path`, replacing an earlier manifest
    pub fn write(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }
}
