//! Service modules for the phrase splitting pipeline

pub mod chunk_exporter;
pub mod encoder;
pub mod loudness_profiler;
pub mod phrase_segmenter;
pub mod silence_detector;

pub use chunk_exporter::{chunk_file_name, ChunkExporter, ExportOutcome};
pub use encoder::{encoder_for, ChunkEncoder, EncodeError, Mp3Encoder, WavEncoder};
pub use loudness_profiler::{LoudnessCurve, LoudnessFrame, LoudnessProfiler, SILENCE_FLOOR_DB};
pub use phrase_segmenter::PhraseSegmenter;
pub use silence_detector::SilenceDetector;
