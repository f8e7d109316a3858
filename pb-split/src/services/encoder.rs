//! Chunk encoders
//!
//! WAV is written directly with `hound`. MP3 is produced by piping an
//! in-memory WAV stream through `ffmpeg` (libmp3lame), located on `PATH`.

use std::io::{Cursor, Seek, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::debug;

use crate::models::OutputFormat;

/// Default MP3 bitrate in kbit/s
pub const DEFAULT_MP3_BITRATE_KBPS: u32 = 192;

/// Encoder errors
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("WAV write failed: {0}")]
    Wav(#[from] hound::Error),

    #[error("ffmpeg not found in PATH")]
    FfmpegNotFound,

    #[error("ffmpeg failed (exit code {exit_code:?}): {stderr}")]
    FfmpegFailed {
        exit_code: Option<i32>,
        stderr: String,
    },
}

/// Writes one chunk of interleaved f32 samples to a file
pub trait ChunkEncoder: Send + Sync {
    /// Format written by this encoder
    fn format(&self) -> OutputFormat;

    /// Encode `samples` to `path`, replacing any existing file
    fn encode(
        &self,
        samples: &[f32],
        sample_rate: u32,
        channels: u16,
        path: &Path,
    ) -> Result<(), EncodeError>;
}

/// Build the production encoder for `format`
pub fn encoder_for(format: OutputFormat) -> Result<Box<dyn ChunkEncoder>, EncodeError> {
    match format {
        OutputFormat::Wav => Ok(Box::new(WavEncoder)),
        OutputFormat::Mp3 => Ok(Box::new(Mp3Encoder::locate()?)),
    }
}

/// 16-bit PCM WAV encoder
#[derive(Debug, Clone, Copy, Default)]
pub struct WavEncoder;

impl ChunkEncoder for WavEncoder {
    fn format(&self) -> OutputFormat {
        OutputFormat::Wav
    }

    fn encode(
        &self,
        samples: &[f32],
        sample_rate: u32,
        channels: u16,
        path: &Path,
    ) -> Result<(), EncodeError> {
        let file = std::io::BufWriter::new(std::fs::File::create(path)?);
        write_wav(file, samples, sample_rate, channels)?;
        Ok(())
    }
}

/// MP3 encoder backed by the ffmpeg CLI
#[derive(Debug, Clone)]
pub struct Mp3Encoder {
    ffmpeg: PathBuf,
    bitrate_kbps: u32,
}

impl Mp3Encoder {
    /// Find `ffmpeg` on PATH
    pub fn locate() -> Result<Self, EncodeError> {
        let ffmpeg = which::which("ffmpeg").map_err(|_| EncodeError::FfmpegNotFound)?;
        debug!(ffmpeg = %ffmpeg.display(), "Located ffmpeg");
        Ok(Self::with_binary(ffmpeg))
    }

    /// Use a specific ffmpeg binary
    pub fn with_binary(ffmpeg: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            bitrate_kbps: DEFAULT_MP3_BITRATE_KBPS,
        }
    }

    pub fn with_bitrate(mut self, bitrate_kbps: u32) -> Self {
        self.bitrate_kbps = bitrate_kbps;
        self
    }

    /// ffmpeg arguments reading WAV from stdin and writing MP3 to `output`.
    ///
    /// The output container is named explicitly since `output` may be a
    /// staging name without an `.mp3` extension.
    pub fn build_args(&self, output: &Path) -> Vec<String> {
        vec![
            "-y".to_string(),
            "-hide_banner".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            "-f".to_string(),
            "wav".to_string(),
            "-i".to_string(),
            "pipe:0".to_string(),
            "-codec:a".to_string(),
            "libmp3lame".to_string(),
            "-b:a".to_string(),
            format!("{}k", self.bitrate_kbps),
            "-f".to_string(),
            "mp3".to_string(),
            output.to_string_lossy().into_owned(),
        ]
    }
}

impl ChunkEncoder for Mp3Encoder {
    fn format(&self) -> OutputFormat {
        OutputFormat::Mp3
    }

    fn encode(
        &self,
        samples: &[f32],
        sample_rate: u32,
        channels: u16,
        path: &Path,
    ) -> Result<(), EncodeError> {
        let mut wav = Cursor::new(Vec::new());
        write_wav(&mut wav, samples, sample_rate, channels)?;

        let mut child = Command::new(&self.ffmpeg)
            .args(self.build_args(path))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()?;

        // stdin is dropped at the end of this block so ffmpeg sees EOF
        let write_result = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(wav.get_ref()),
            None => Ok(()),
        };

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(EncodeError::FfmpegFailed {
                exit_code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        write_result?;
        Ok(())
    }
}

/// Write interleaved f32 samples as 16-bit PCM WAV
pub fn write_wav<W: Write + Seek>(
    writer: W,
    samples: &[f32],
    sample_rate: u32,
    channels: u16,
) -> Result<(), hound::Error> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::new(writer, spec)?;
    for &sample in samples {
        writer.write_sample(to_i16(sample))?;
    }
    writer.finalize()
}

/// Convert a [-1.0, 1.0] sample to i16, clipping out-of-range values
fn to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32).round() as i16
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_to_i16_clips() {
        assert_eq!(to_i16(0.0), 0);
        assert_eq!(to_i16(1.0), i16::MAX);
        assert_eq!(to_i16(2.0), i16::MAX);
        assert_eq!(to_i16(-1.0), -i16::MAX);
        assert_eq!(to_i16(-3.0), -i16::MAX);
    }

    #[test]
    fn test_wav_encoder_writes_readable_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("chunk.wav");
        let samples = vec![0.5f32; 2 * 800];

        WavEncoder.encode(&samples, 8000, 2, &path).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 2);
        assert_eq!(spec.sample_rate, 8000);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(reader.duration(), 800);
    }

    #[test]
    fn test_wav_encoder_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("chunk.wav");
        std::fs::write(&path, b"stale contents").unwrap();

        WavEncoder.encode(&[0.1; 100], 1000, 1, &path).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.duration(), 100);
    }

    #[test]
    fn test_wav_encoder_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("chunk.wav");
        let err = WavEncoder.encode(&[0.1; 10], 1000, 1, &path).unwrap_err();
        assert!(matches!(err, EncodeError::Io(_)));
    }

    #[test]
    fn test_mp3_args() {
        let encoder = Mp3Encoder::with_binary("/usr/bin/ffmpeg").with_bitrate(128);
        let args = encoder.build_args(Path::new("out/phrase1.mp3"));

        assert_eq!(args.first().map(String::as_str), Some("-y"));
        assert!(args.windows(2).any(|w| w[0] == "-i" && w[1] == "pipe:0"));
        assert!(args.windows(2).any(|w| w[0] == "-codec:a" && w[1] == "libmp3lame"));
        assert!(args.windows(2).any(|w| w[0] == "-b:a" && w[1] == "128k"));
        assert_eq!(args.last().map(String::as_str), Some("out/phrase1.mp3"));
    }

    #[test]
    fn test_mp3_args_name_container_for_staging_path() {
        let encoder = Mp3Encoder::with_binary("/usr/bin/ffmpeg");
        let args = encoder.build_args(Path::new("out/phrase1.mp3.part"));

        let n = args.len();
        assert_eq!(args[n - 3..], ["-f", "mp3", "out/phrase1.mp3.part"]);
    }

    #[test]
    fn test_mp3_missing_binary_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let encoder = Mp3Encoder::with_binary(temp_dir.path().join("no-such-ffmpeg"));
        let err = encoder
            .encode(&[0.0; 10], 1000, 1, &temp_dir.path().join("x.mp3"))
            .unwrap_err();
        assert!(matches!(err, EncodeError::Io(_)));
    }

    #[test]
    fn test_encoder_formats() {
        assert_eq!(WavEncoder.format(), OutputFormat::Wav);
        assert_eq!(encoder_for(OutputFormat::Wav).unwrap().format(), OutputFormat::Wav);
        assert_eq!(Mp3Encoder::with_binary("ffmpeg").format(), OutputFormat::Mp3);
    }
}
