//! Error types for pb-voice

use std::path::PathBuf;
use thiserror::Error;

/// Synthesis failure for one phrase
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// Phrase text was empty or whitespace
    #[error("Phrase text is empty (target {file_name})")]
    EmptyText { file_name: String },

    /// The speech service rejected or failed the request
    #[error("Speech service error: {0}")]
    Service(String),

    /// The service returned no audio
    #[error("Speech service returned no audio for '{text}'")]
    NoAudio { text: String },

    /// Writing the synthesized clip failed
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience Result type using SynthesisError
pub type Result<T> = std::result::Result<T, SynthesisError>;
