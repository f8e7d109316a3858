//! Chunk export: one output file per phrase span
//!
//! Export is attempted for every phrase. A failure is logged and recorded,
//! and the batch continues, so the caller always gets the largest set of
//! chunks that could be written plus an itemized failure list.

use pb_common::human_time::format_duration_ms;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{ExportError, Result};
use crate::models::{ExportedChunk, OutputFormat, PhraseSpan, Waveform};
use crate::services::encoder::{ChunkEncoder, EncodeError};

/// Result of exporting a batch of phrases
#[derive(Debug, Default)]
pub struct ExportOutcome {
    /// Chunks written, in index order
    pub written: Vec<ExportedChunk>,
    /// Chunks that failed, in index order
    pub failed: Vec<ExportError>,
}

impl ExportOutcome {
    /// True when no chunk failed (including the zero-phrase case)
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn attempted(&self) -> usize {
        self.written.len() + self.failed.len()
    }
}

/// File name for phrase `index`: `{base_name}{index}.{ext}`, no zero padding
pub fn chunk_file_name(base_name: &str, index: usize, format: OutputFormat) -> String {
    format!("{}{}.{}", base_name, index, format.extension())
}

/// Staging path for `path`: `phrase3.wav` → `phrase3.wav.part`
pub fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    path.with_file_name(name)
}

/// Chunk exporter
///
/// Each chunk is encoded to a `.part` sibling and renamed into place only
/// after the encoder succeeds, so a failed chunk never leaves a truncated
/// file under its final name.
pub struct ChunkExporter {
    encoder: Box<dyn ChunkEncoder>,
}

impl ChunkExporter {
    pub fn new(encoder: Box<dyn ChunkEncoder>) -> Self {
        Self { encoder }
    }

    pub fn format(&self) -> OutputFormat {
        self.encoder.format()
    }

    /// Write every phrase of `waveform` into `output_dir`.
    ///
    /// Only failure to create `output_dir` is returned as an error; chunk
    /// failures are collected in the outcome.
    pub fn export(
        &self,
        waveform: &Waveform,
        phrases: &[PhraseSpan],
        output_dir: &Path,
        base_name: &str,
    ) -> Result<ExportOutcome> {
        std::fs::create_dir_all(output_dir)?;

        let mut outcome = ExportOutcome::default();
        for phrase in phrases {
            let path = output_dir.join(chunk_file_name(base_name, phrase.index, self.format()));
            match self.write_chunk(waveform, phrase, &path) {
                Ok(()) => {
                    info!(
                        phrase_index = phrase.index,
                        start_ms = phrase.start_ms(),
                        end_ms = phrase.end_ms(),
                        "Exported: {} ({})",
                        path.display(),
                        format_duration_ms(phrase.duration_ms())
                    );
                    outcome.written.push(ExportedChunk {
                        phrase: *phrase,
                        path,
                    });
                }
                Err(source) => {
                    warn!(
                        phrase_index = phrase.index,
                        path = %path.display(),
                        error = %source,
                        "Chunk export failed, continuing with remaining phrases"
                    );
                    outcome.failed.push(ExportError {
                        index: phrase.index,
                        path,
                        source,
                    });
                }
            }
        }

        Ok(outcome)
    }

    fn write_chunk(
        &self,
        waveform: &Waveform,
        phrase: &PhraseSpan,
        path: &Path,
    ) -> std::result::Result<(), EncodeError> {
        let staging = partial_path(path);
        let result = self
            .encoder
            .encode(
                waveform.slice(&phrase.span),
                waveform.sample_rate(),
                waveform.channels(),
                &staging,
            )
            .and_then(|()| std::fs::rename(&staging, path).map_err(EncodeError::from));

        if result.is_err() {
            match std::fs::remove_file(&staging) {
                Ok(()) => debug!(path = %staging.display(), "Removed partial chunk"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => warn!(path = %staging.display(), error = %e, "Failed to remove partial chunk"),
            }
        }
        result
    }
}
