//! Decoded audio held in memory for one pipeline run

use pb_common::human_time::{frames_to_ms, ms_to_frames};

use crate::error::WaveformError;
use crate::models::Span;

/// Interleaved f32 PCM audio, range [-1.0, 1.0].
///
/// Immutable once built. Always holds at least one complete frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    samples: Vec<f32>,
    sample_rate: u32,
    channels: u16,
    bits_per_sample: u32,
}

impl Waveform {
    /// Build a waveform from interleaved samples
    pub fn new(
        samples: Vec<f32>,
        sample_rate: u32,
        channels: u16,
        bits_per_sample: u32,
    ) -> Result<Self, WaveformError> {
        if sample_rate == 0 {
            return Err(WaveformError::ZeroSampleRate);
        }
        if channels == 0 {
            return Err(WaveformError::ZeroChannels);
        }
        if samples.is_empty() {
            return Err(WaveformError::Empty);
        }
        if samples.len() % channels as usize != 0 {
            return Err(WaveformError::PartialFrame {
                samples: samples.len(),
                channels,
            });
        }

        Ok(Self {
            samples,
            sample_rate,
            channels,
            bits_per_sample,
        })
    }

    /// Interleaved samples
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Bit depth reported by the source codec
    pub fn bits_per_sample(&self) -> u32 {
        self.bits_per_sample
    }

    /// Number of PCM frames (one sample per channel)
    pub fn frame_count(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    /// Duration in whole milliseconds (floor)
    pub fn duration_ms(&self) -> u64 {
        frames_to_ms(self.frame_count() as u64, self.sample_rate)
    }

    /// Duration in seconds
    pub fn duration_seconds(&self) -> f64 {
        self.frame_count() as f64 / self.sample_rate as f64
    }

    /// Frame position for a millisecond offset.
    ///
    /// Offsets at or past the end map to `frame_count()`, so a span ending at
    /// `duration_ms()` keeps the sub-millisecond tail.
    pub fn frame_at_ms(&self, ms: u64) -> usize {
        if ms >= self.duration_ms() {
            return self.frame_count();
        }
        (ms_to_frames(ms, self.sample_rate) as usize).min(self.frame_count())
    }

    /// Interleaved samples covered by `span`
    pub fn slice(&self, span: &Span) -> &[f32] {
        let start = self.frame_at_ms(span.start_ms);
        let end = self.frame_at_ms(span.end_ms).max(start);
        let ch = self.channels as usize;
        &self.samples[start * ch..end * ch]
    }
}
