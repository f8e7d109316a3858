//! Phrase splitting workflow
//!
//! Runs the stages in sequence on one input file:
//! decode → profile → segment → export → report.
//!
//! Each run owns its waveform and loudness curve exclusively, so separate
//! runs share nothing and need no synchronization.

pub mod pipeline;
pub mod report;

pub use pipeline::Pipeline;
pub use report::{manifest_file_name, ChunkFailure, ChunkSummary, Manifest, ManifestEntry, SplitReport};
