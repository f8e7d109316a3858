//! Phrase segmentation from silence spans
//!
//! **Algorithm:**
//! 1. Detect silence spans on the loudness curve ([`SilenceDetector`])
//! 2. Phrase candidates are the complement of the silence spans; empty
//!    candidates are dropped
//! 3. Widen each phrase by `keep_silence_ms` on both sides. Where two
//!    widened neighbours would overlap, both are cut at the midpoint of the
//!    gap between them; the result is then clamped to `[0, duration_ms]`
//! 4. Number phrases 1..=N in chronological order
//!
//! A curve that never rises above the threshold yields no phrases, whatever
//! its length. A curve with no qualifying silence yields one phrase covering
//! the whole waveform.

use tracing::debug;

use crate::error::Result;
use crate::models::{PhraseSpan, Span, SplitParameters};
use crate::services::loudness_profiler::LoudnessCurve;
use crate::services::silence_detector::SilenceDetector;

/// Phrase segmenter
#[derive(Debug, Clone)]
pub struct PhraseSegmenter {
    detector: SilenceDetector,
    keep_silence_ms: u64,
}

impl PhraseSegmenter {
    /// Create new phrase segmenter
    pub fn new(min_silence_len_ms: u64, silence_thresh_db: f64, keep_silence_ms: u64) -> Result<Self> {
        let detector = SilenceDetector::new()
            .with_threshold_db(silence_thresh_db)?
            .with_min_silence_len(min_silence_len_ms)?;
        Ok(Self {
            detector,
            keep_silence_ms,
        })
    }

    pub fn from_parameters(params: &SplitParameters) -> Result<Self> {
        Self::new(
            params.min_silence_len_ms,
            params.silence_thresh_db,
            params.keep_silence_ms,
        )
    }

    pub fn keep_silence_ms(&self) -> u64 {
        self.keep_silence_ms
    }

    /// Silence spans of the curve
    pub fn detect_silence(&self, curve: &LoudnessCurve) -> Vec<Span> {
        self.detector.detect(curve)
    }

    /// Unpadded phrase spans: the complement of the silence spans
    pub fn detect_nonsilent(&self, curve: &LoudnessCurve) -> Vec<Span> {
        let duration_ms = curve.duration_ms();

        if curve.all_at_or_below(self.detector.threshold_db()) {
            return Vec::new();
        }

        let silences = self.detect_silence(curve);
        let mut phrases = Vec::with_capacity(silences.len() + 1);
        let mut cursor = 0u64;

        for silence in &silences {
            if let Some(span) = Span::non_empty(cursor, silence.start_ms) {
                phrases.push(span);
            }
            cursor = silence.end_ms;
        }

        if let Some(span) = Span::non_empty(cursor, duration_ms) {
            phrases.push(span);
        }

        phrases
    }

    /// Padded, indexed phrase spans
    pub fn segment(&self, curve: &LoudnessCurve) -> Vec<PhraseSpan> {
        let nonsilent = self.detect_nonsilent(curve);
        let padded = pad_spans(&nonsilent, self.keep_silence_ms, curve.duration_ms());

        debug!(
            nonsilent_count = nonsilent.len(),
            keep_silence_ms = self.keep_silence_ms,
            "Derived phrase spans"
        );

        padded
            .into_iter()
            .enumerate()
            .map(|(i, span)| PhraseSpan::new(i + 1, span))
            .collect()
    }
}

/// Segment a loudness curve into indexed phrase spans
pub fn segment(
    curve: &LoudnessCurve,
    min_silence_len_ms: u64,
    silence_thresh_db: f64,
    keep_silence_ms: u64,
) -> Result<Vec<PhraseSpan>> {
    Ok(PhraseSegmenter::new(min_silence_len_ms, silence_thresh_db, keep_silence_ms)?.segment(curve))
}

/// Widen ordered, disjoint spans by `keep_ms` without letting neighbours overlap.
///
/// Neighbours whose padding would meet share their gap at its midpoint.
/// The midpoint comes from the unpadded spans, so clamping at either end of
/// the recording cannot push a boundary into a phrase's content.
fn pad_spans(spans: &[Span], keep_ms: u64, duration_ms: u64) -> Vec<Span> {
    spans
        .iter()
        .enumerate()
        .map(|(i, span)| {
            let mut start_ms = span.start_ms.saturating_sub(keep_ms);
            let mut end_ms = span.end_ms.saturating_add(keep_ms).min(duration_ms);

            if let Some(prev) = i.checked_sub(1).map(|p| &spans[p]) {
                start_ms = start_ms.max(gap_midpoint(prev, span));
            }
            if let Some(next) = spans.get(i + 1) {
                end_ms = end_ms.min(gap_midpoint(span, next));
            }

            Span { start_ms, end_ms }
        })
        .collect()
}

/// Midpoint of the gap between two ordered spans, in `[prev.end_ms, next.start_ms)`
fn gap_midpoint(prev: &Span, next: &Span) -> u64 {
    prev.end_ms + (next.start_ms - prev.end_ms) / 2
}
