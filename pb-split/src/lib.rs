//! pb-split library interface
//!
//! Splits a spoken-word recording into numbered phrase clips by detecting
//! silence gaps. The stages run in sequence on one input file:
//!
//! 1. [`utils::audio_decoder`] decodes the file into a [`models::Waveform`]
//! 2. [`services::loudness_profiler`] computes a windowed dBFS curve
//! 3. [`services::phrase_segmenter`] finds silence spans and derives padded phrase spans
//! 4. [`services::chunk_exporter`] writes one file per phrase
//!
//! [`workflow::Pipeline`] wires the stages together and produces a
//! [`workflow::SplitReport`].

pub mod error;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

pub use crate::error::{ExportError, Result, SplitError};
pub use crate::workflow::{Pipeline, SplitReport};
