//! Error types for pb-split
//!
//! Run-level failures (`SplitError`) abort the whole run because every later
//! stage depends on the decoded audio. Per-chunk export failures
//! (`ExportError`) are collected and reported; the batch keeps going.

use std::path::PathBuf;
use thiserror::Error;

use crate::services::encoder::EncodeError;

/// Run-level error
#[derive(Debug, Error)]
pub enum SplitError {
    /// Missing file, unsupported codec, or corrupt container
    #[error("Unreadable audio file {}: {reason}", .path.display())]
    UnreadableAudio { path: PathBuf, reason: String },

    /// The stream decoded to zero samples
    #[error("Audio file contains no samples: {}", .path.display())]
    EmptyAudio { path: PathBuf },

    /// Configuration rejected at pipeline entry
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// The output format needs an encoder that is not available
    #[error("Encoder unavailable: {0}")]
    EncoderUnavailable(String),

    /// Output directory could not be created
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SplitError {
    pub(crate) fn unreadable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        SplitError::UnreadableAudio {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Convenience Result type using SplitError
pub type Result<T> = std::result::Result<T, SplitError>;

/// Failure to write one phrase chunk
#[derive(Debug, Error)]
#[error("Failed to export phrase {index} to {}: {source}", .path.display())]
pub struct ExportError {
    /// 1-based phrase index
    pub index: usize,
    /// Target file path
    pub path: PathBuf,
    /// Underlying encoder failure
    #[source]
    pub source: EncodeError,
}

/// Waveform construction errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WaveformError {
    #[error("waveform has no samples")]
    Empty,

    #[error("sample rate must be positive")]
    ZeroSampleRate,

    #[error("channel count must be positive")]
    ZeroChannels,

    #[error("{samples} samples do not divide into {channels} channels")]
    PartialFrame { samples: usize, channels: u16 },
}
