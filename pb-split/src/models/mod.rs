//! Data models for pb-split

pub mod parameters;
pub mod span;
pub mod waveform;

pub use parameters::{OutputFormat, SplitParameters};
pub use span::{ExportedChunk, PhraseSpan, Span};
pub use waveform::Waveform;
