//! Silence detection over a loudness curve
//!
//! A silence span is a maximal run of consecutive frames, all at or below the
//! threshold, whose total duration reaches the minimum length. Runs are
//! maximal, so adjacent silent frames are always merged into one span and a
//! phrase between two spans is at least one profiler window long.

use crate::error::{Result, SplitError};
use crate::models::Span;
use crate::services::loudness_profiler::LoudnessCurve;
use tracing::debug;

/// Silence detector
#[derive(Debug, Clone)]
pub struct SilenceDetector {
    /// Silence threshold in dBFS (default: -40dB)
    threshold_db: f64,

    /// Minimum silence duration in ms (default: 500ms)
    min_silence_len_ms: u64,
}

impl SilenceDetector {
    /// Create new silence detector with defaults
    pub fn new() -> Self {
        Self {
            threshold_db: -40.0,
            min_silence_len_ms: 500,
        }
    }

    /// Set silence threshold in dBFS
    pub fn with_threshold_db(mut self, threshold_db: f64) -> Result<Self> {
        if !threshold_db.is_finite() || threshold_db > 0.0 {
            return Err(SplitError::InvalidParameters(format!(
                "Threshold must be a finite negative dB value, got {threshold_db}"
            )));
        }
        self.threshold_db = threshold_db;
        Ok(self)
    }

    /// Set minimum silence duration
    pub fn with_min_silence_len(mut self, min_silence_len_ms: u64) -> Result<Self> {
        if min_silence_len_ms == 0 {
            return Err(SplitError::InvalidParameters(
                "Min silence length must be >= 1ms".to_string(),
            ));
        }
        self.min_silence_len_ms = min_silence_len_ms;
        Ok(self)
    }

    pub fn threshold_db(&self) -> f64 {
        self.threshold_db
    }

    pub fn min_silence_len_ms(&self) -> u64 {
        self.min_silence_len_ms
    }

    /// Whether a frame at `loudness_db` counts as silent
    pub fn is_silent(&self, loudness_db: f64) -> bool {
        loudness_db <= self.threshold_db
    }

    /// Detect silence spans, in chronological order
    pub fn detect(&self, curve: &LoudnessCurve) -> Vec<Span> {
        let mut regions = Vec::new();
        let mut run: Option<(u64, u64)> = None;

        for frame in curve.frames() {
            if self.is_silent(frame.loudness_db) {
                run = match run {
                    Some((start, _)) => Some((start, frame.end_ms)),
                    None => Some((frame.start_ms, frame.end_ms)),
                };
            } else if let Some((start, end)) = run.take() {
                self.push_if_long_enough(&mut regions, start, end);
            }
        }

        // Handle silence at end of file
        if let Some((start, end)) = run {
            self.push_if_long_enough(&mut regions, start, end);
        }

        debug!(
            silence_count = regions.len(),
            threshold_db = self.threshold_db,
            min_silence_len_ms = self.min_silence_len_ms,
            "Detected silence spans"
        );
        regions
    }

    fn push_if_long_enough(&self, regions: &mut Vec<Span>, start: u64, end: u64) {
        if end - start >= self.min_silence_len_ms {
            if let Some(span) = Span::non_empty(start, end) {
                regions.push(span);
            }
        }
    }
}

impl Default for SilenceDetector {
    fn default() -> Self {
        Self::new()
    }
}
