//! Audio Decoding Utilities
//!
//! **Purpose:** Decode an audio file to an interleaved f32 [`Waveform`]
//!
//! Uses symphonia for format-agnostic decoding (MP3, AAC/M4A, FLAC, WAV, OGG).
//! The file is opened read-only and owned by the format reader, so it is
//! released on every return path.

use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::{debug, warn};

use crate::error::{Result, SplitError, WaveformError};
use crate::models::Waveform;

/// Bit depth recorded when the codec does not report one (decoded f32)
const DEFAULT_BITS_PER_SAMPLE: u32 = 32;

/// Decode audio file to interleaved f32 PCM samples
///
/// **Algorithm:**
/// 1. Open file and probe format using symphonia
/// 2. Find first decodable audio track
/// 3. Create decoder for track codec
/// 4. Decode all packets, interleaving channels into one f32 buffer
/// 5. Build the waveform; zero frames is `EmptyAudio`
///
/// # Errors
/// * `UnreadableAudio` - missing file, unsupported format, corrupt data
/// * `EmptyAudio` - the stream holds no samples
pub fn decode_audio_file(file_path: &Path) -> Result<Waveform> {
    debug!(path = %file_path.display(), "Decoding audio file");

    let file = std::fs::File::open(file_path)
        .map_err(|e| SplitError::unreadable(file_path, format!("Failed to open audio file: {e}")))?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    // Create format hint from file extension
    let mut hint = Hint::new();
    if let Some(extension) = file_path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(extension);
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| SplitError::unreadable(file_path, format!("Unsupported or corrupt container: {e}")))?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| SplitError::unreadable(file_path, "No audio track found in file"))?;

    let track_id = track.id;
    let mut sample_rate = track.codec_params.sample_rate;
    let mut channels = track.codec_params.channels.map(|c| c.count() as u16);
    let bits_per_sample = track
        .codec_params
        .bits_per_sample
        .unwrap_or(DEFAULT_BITS_PER_SAMPLE);

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| SplitError::unreadable(file_path, format!("Unsupported codec: {e}")))?;

    let mut samples: Vec<f32> = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                // End of stream
                break;
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => {
                return Err(SplitError::unreadable(
                    file_path,
                    format!("Error reading packet: {e}"),
                ));
            }
        };

        // Skip packets from other tracks
        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(SymphoniaError::DecodeError(e)) => {
                warn!(path = %file_path.display(), error = %e, "Skipping undecodable packet");
                continue;
            }
            Err(e) => {
                return Err(SplitError::unreadable(
                    file_path,
                    format!("Failed to decode packet: {e}"),
                ));
            }
        };

        // The decoded signal spec is authoritative (AAC often omits channels up front)
        let spec = *decoded.spec();
        sample_rate = Some(spec.rate);
        channels = Some(spec.channels.count() as u16);

        let needed = decoded.capacity() * spec.channels.count();
        if sample_buf.as_ref().map_or(true, |buf| buf.capacity() < needed) {
            sample_buf = Some(SampleBuffer::<f32>::new(decoded.capacity() as u64, spec));
        }
        if let Some(buf) = sample_buf.as_mut() {
            buf.copy_interleaved_ref(decoded);
            samples.extend_from_slice(buf.samples());
        }
    }

    let sample_rate = sample_rate
        .ok_or_else(|| SplitError::unreadable(file_path, "Sample rate unknown"))?;
    let channels = channels.ok_or_else(|| SplitError::unreadable(file_path, "Channels unknown"))?;

    let waveform = Waveform::new(samples, sample_rate, channels, bits_per_sample).map_err(|e| match e {
        WaveformError::Empty => SplitError::EmptyAudio {
            path: file_path.to_path_buf(),
        },
        other => SplitError::unreadable(file_path, other.to_string()),
    })?;

    debug!(
        path = %file_path.display(),
        sample_rate,
        channels,
        bits_per_sample,
        duration_ms = waveform.duration_ms(),
        "Audio decoding complete"
    );

    Ok(waveform)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_decode_audio_file_not_found() {
        let result = decode_audio_file(Path::new("/nonexistent/file.mp3"));
        match result {
            Err(SplitError::UnreadableAudio { reason, .. }) => {
                assert!(reason.contains("Failed to open audio file"));
            }
            other => panic!("expected UnreadableAudio, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_garbage_is_unreadable() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("noise.m4a");
        std::fs::write(&path, b"definitely not an audio container").unwrap();

        let result = decode_audio_file(&path);
        assert!(matches!(result, Err(SplitError::UnreadableAudio { .. })));
    }

    #[test]
    fn test_decode_wav_preserves_channels() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("stereo.wav");
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 22_050,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for i in 0..22_050 {
            writer.write_sample(if i % 2 == 0 { 8000i16 } else { -8000 }).unwrap();
            writer.write_sample(0i16).unwrap();
        }
        writer.finalize().unwrap();

        let waveform = decode_audio_file(&path).unwrap();
        assert_eq!(waveform.channels(), 2);
        assert_eq!(waveform.sample_rate(), 22_050);
        assert_eq!(waveform.bits_per_sample(), 16);
        assert_eq!(waveform.frame_count(), 22_050);
        assert_eq!(waveform.duration_ms(), 1000);
        // Right channel silent, left channel non-zero
        assert_eq!(waveform.samples()[1], 0.0);
        assert!(waveform.samples()[0].abs() > 0.2);
    }

    #[test]
    fn test_decode_empty_wav_is_empty_audio() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.wav");
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 16_000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        hound::WavWriter::create(&path, spec).unwrap().finalize().unwrap();

        let result = decode_audio_file(&path);
        assert!(matches!(result, Err(SplitError::EmptyAudio { .. })));
    }
}
