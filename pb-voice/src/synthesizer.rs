//! Speech synthesis seam

use crate::error::Result;
use crate::voice::VoiceSettings;

/// Text-to-speech service
///
/// Implementations return encoded audio (MP3) for one phrase. They must be
/// safe to call concurrently; the generator issues every request at once.
#[async_trait::async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` with `settings`
    async fn synthesize(&self, text: &str, settings: &VoiceSettings) -> Result<Vec<u8>>;
}
