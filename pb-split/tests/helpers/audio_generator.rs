//! Audio Test Fixture Generator
//!
//! Builds 16-bit WAV files from a sequence of tone and silence segments

use std::path::{Path, PathBuf};

/// One stretch of generated audio
#[derive(Debug, Clone, Copy)]
pub enum Segment {
    /// 440 Hz sine at `amplitude` (0.0..=1.0 of full scale)
    Tone { ms: u64, amplitude: f32 },
    /// Digital silence
    Silence { ms: u64 },
}

impl Segment {
    pub fn tone(ms: u64) -> Self {
        Segment::Tone { ms, amplitude: 0.3 }
    }

    pub fn silence(ms: u64) -> Self {
        Segment::Silence { ms }
    }

    fn ms(&self) -> u64 {
        match self {
            Segment::Tone { ms, .. } | Segment::Silence { ms } => *ms,
        }
    }
}

/// Configuration for generated audio
#[derive(Debug, Clone)]
pub struct AudioConfig {
    pub sample_rate: u32,
    pub channels: u16,
    pub segments: Vec<Segment>,
}

impl AudioConfig {
    /// Mono 44.1 kHz audio made of `segments`
    pub fn mono(segments: Vec<Segment>) -> Self {
        Self {
            sample_rate: 44_100,
            channels: 1,
            segments,
        }
    }

    pub fn duration_ms(&self) -> u64 {
        self.segments.iter().map(Segment::ms).sum()
    }
}

/// Generate a test WAV file with specified configuration
pub fn generate_test_wav(path: &Path, config: &AudioConfig) -> anyhow::Result<PathBuf> {
    let spec = hound::WavSpec {
        channels: config.channels,
        sample_rate: config.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)?;
    let mut position = 0usize;

    for segment in &config.segments {
        let frames = (segment.ms() * config.sample_rate as u64 / 1000) as usize;
        for _ in 0..frames {
            let sample = match segment {
                Segment::Silence { .. } => 0,
                Segment::Tone { amplitude, .. } => {
                    let t = position as f32 / config.sample_rate as f32;
                    let value = amplitude * (2.0 * std::f32::consts::PI * 440.0 * t).sin();
                    (value * i16::MAX as f32) as i16
                }
            };
            for _ in 0..config.channels {
                writer.write_sample(sample)?;
            }
            position += 1;
        }
    }

    writer.finalize()?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generate_segments() {
        let temp_dir = TempDir::new().unwrap();
        let wav_path = temp_dir.path().join("test.wav");
        let config = AudioConfig::mono(vec![
            Segment::tone(1000),
            Segment::silence(500),
            Segment::tone(250),
        ]);

        generate_test_wav(&wav_path, &config).unwrap();

        let reader = hound::WavReader::open(&wav_path).unwrap();
        assert_eq!(reader.duration(), 44_100 * 1750 / 1000);
        assert_eq!(config.duration_ms(), 1750);
    }
}
