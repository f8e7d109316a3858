//! Windowed loudness profile (dBFS) over a waveform
//!
//! **Algorithm:**
//! 1. Cut the waveform into windows of `window_ms` worth of frames
//! 2. RMS over every interleaved sample of the window (all channels combined)
//! 3. Convert to dBFS, clamped to `[SILENCE_FLOOR_DB, 0.0]`
//!
//! The last window may be shorter; a tail shorter than one millisecond joins
//! the previous window, so no frame has zero length (unless the whole
//! waveform is under 1ms). Frame times derive from sample positions, so the
//! curve covers `[0, duration_ms)` with no gap or overlap.

use pb_common::human_time::{frames_to_ms, ms_to_frames};
use tracing::debug;

use crate::error::{Result, SplitError};
use crate::models::Waveform;

/// Loudness assigned to zero-energy windows
pub const SILENCE_FLOOR_DB: f64 = -120.0;

/// One analysis window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoudnessFrame {
    pub start_ms: u64,
    pub end_ms: u64,
    /// Loudness relative to full scale, in `[SILENCE_FLOOR_DB, 0.0]`
    pub loudness_db: f64,
}

impl LoudnessFrame {
    pub fn duration_ms(&self) -> u64 {
        self.end_ms - self.start_ms
    }
}

/// Time-ordered, contiguous loudness frames covering a whole waveform
#[derive(Debug, Clone, PartialEq)]
pub struct LoudnessCurve {
    frames: Vec<LoudnessFrame>,
    window_ms: u64,
    duration_ms: u64,
}

impl LoudnessCurve {
    pub fn frames(&self) -> &[LoudnessFrame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Nominal window length used to build the curve
    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    /// Duration of the profiled waveform
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Loudest frame, or the silence floor for an empty curve
    pub fn peak_db(&self) -> f64 {
        self.frames
            .iter()
            .map(|f| f.loudness_db)
            .fold(SILENCE_FLOOR_DB, f64::max)
    }

    /// Whether every frame is at or below `threshold_db`
    pub fn all_at_or_below(&self, threshold_db: f64) -> bool {
        self.frames.iter().all(|f| f.loudness_db <= threshold_db)
    }
}

/// Loudness profiler
#[derive(Debug, Clone)]
pub struct LoudnessProfiler {
    window_ms: u64,
}

impl LoudnessProfiler {
    /// Create profiler with the given window length
    pub fn new(window_ms: u64) -> Result<Self> {
        if window_ms == 0 {
            return Err(SplitError::InvalidParameters(
                "Profiler window must be at least 1ms".to_string(),
            ));
        }
        Ok(Self { window_ms })
    }

    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    /// Compute the loudness curve of `waveform`
    pub fn profile(&self, waveform: &Waveform) -> LoudnessCurve {
        let sample_rate = waveform.sample_rate();
        let channels = waveform.channels() as usize;
        let total_frames = waveform.frame_count();
        // Sub-millisecond sample rates still advance at least one frame
        let window_frames = (ms_to_frames(self.window_ms, sample_rate) as usize).max(1);

        let mut bounds: Vec<(usize, usize)> = (0..total_frames)
            .step_by(window_frames)
            .map(|first| (first, (first + window_frames).min(total_frames)))
            .collect();

        // A sub-millisecond tail would be a zero-length frame; fold it into
        // the previous window instead
        let n = bounds.len();
        if n > 1 {
            let (tail_first, tail_last) = bounds[n - 1];
            if frames_to_ms(tail_first as u64, sample_rate) == frames_to_ms(tail_last as u64, sample_rate) {
                bounds.pop();
                bounds[n - 2].1 = tail_last;
            }
        }

        let samples = waveform.samples();
        let frames: Vec<LoudnessFrame> = bounds
            .iter()
            .map(|&(first, last)| LoudnessFrame {
                start_ms: frames_to_ms(first as u64, sample_rate),
                end_ms: frames_to_ms(last as u64, sample_rate),
                loudness_db: rms_to_dbfs(calculate_rms(&samples[first * channels..last * channels])),
            })
            .collect();

        debug!(
            window_ms = self.window_ms,
            window_frames,
            frame_count = frames.len(),
            "Computed loudness profile"
        );

        LoudnessCurve {
            frames,
            window_ms: self.window_ms,
            duration_ms: waveform.duration_ms(),
        }
    }
}

/// Compute the loudness curve of `waveform` with `window_ms` windows
pub fn profile(waveform: &Waveform, window_ms: u64) -> Result<LoudnessCurve> {
    Ok(LoudnessProfiler::new(window_ms)?.profile(waveform))
}

/// Calculate RMS (Root Mean Square) of samples
pub fn calculate_rms(samples: &[f32]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }

    let sum_squares: f64 = samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum_squares / samples.len() as f64).sqrt()
}

/// Convert linear RMS amplitude to dBFS, never returning -inf or NaN
pub fn rms_to_dbfs(rms: f64) -> f64 {
    if rms.is_nan() || rms <= 0.0 {
        return SILENCE_FLOOR_DB;
    }
    (20.0 * rms.log10()).clamp(SILENCE_FLOOR_DB, 0.0)
}

/// Convert dBFS to linear amplitude
pub fn dbfs_to_linear(db: f64) -> f64 {
    10.0_f64.powf(db / 20.0)
}
