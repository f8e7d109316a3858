//! pb-voice library interface
//!
//! Generates the reference phrase clips with a text-to-speech service.
//! The service itself sits behind [`SpeechSynthesizer`]; this crate owns the
//! phrase list, voice settings, and the concurrent generate-and-write loop.

pub mod error;
pub mod generator;
pub mod synthesizer;
pub mod voice;

pub use error::{Result, SynthesisError};
pub use generator::{generate_phrases, GeneratedPhrase};
pub use synthesizer::SpeechSynthesizer;
pub use voice::{default_phrases, ReferencePhrase, VoiceSettings};
