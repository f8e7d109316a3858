//! Pipeline: decode → profile → segment → export → report

use chrono::Utc;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{Result, SplitError};
use crate::models::{PhraseSpan, SplitParameters, Waveform};
use crate::services::{encoder_for, ChunkEncoder, ChunkExporter, LoudnessProfiler, PhraseSegmenter};
use crate::utils::audio_decoder::decode_audio_file;
use crate::workflow::report::{manifest_file_name, Manifest, SplitReport};

/// Phrase splitting pipeline for one parameter set
pub struct Pipeline {
    params: SplitParameters,
    profiler: LoudnessProfiler,
    segmenter: PhraseSegmenter,
    exporter: ChunkExporter,
}

impl Pipeline {
    /// Validate `params` and locate the encoder for the output format.
    ///
    /// Fails with `EncoderUnavailable` before any audio is touched when the
    /// format needs an external tool that cannot be found.
    pub fn new(params: SplitParameters) -> Result<Self> {
        params.validate()?;
        let encoder = encoder_for(params.output_format)
            .map_err(|e| SplitError::EncoderUnavailable(e.to_string()))?;
        Self::with_encoder(params, encoder)
    }

    /// Build a pipeline around a caller-supplied encoder
    pub fn with_encoder(params: SplitParameters, encoder: Box<dyn ChunkEncoder>) -> Result<Self> {
        params.validate()?;
        if encoder.format() != params.output_format {
            return Err(SplitError::InvalidParameters(format!(
                "encoder writes {} but output format is {}",
                encoder.format(),
                params.output_format
            )));
        }

        Ok(Self {
            profiler: LoudnessProfiler::new(params.window_ms)?,
            segmenter: PhraseSegmenter::from_parameters(&params)?,
            exporter: ChunkExporter::new(encoder),
            params,
        })
    }

    pub fn parameters(&self) -> &SplitParameters {
        &self.params
    }

    /// Padded, indexed phrase spans of an already decoded waveform
    pub fn segment(&self, waveform: &Waveform) -> Vec<PhraseSpan> {
        let curve = self.profiler.profile(waveform);
        debug!(
            frames = curve.len(),
            window_ms = curve.window_ms(),
            peak_db = curve.peak_db(),
            "Loudness profile computed"
        );
        self.segmenter.segment(&curve)
    }

    /// Split `input` into phrase chunks under the configured output directory
    pub fn run(&self, input: &Path) -> Result<SplitReport> {
        let started_at = Utc::now();

        info!(input = %input.display(), "Loading audio file...");
        let waveform = decode_audio_file(input)?;
        info!(
            sample_rate = waveform.sample_rate(),
            channels = waveform.channels(),
            duration_ms = waveform.duration_ms(),
            "Audio decoded"
        );

        info!(
            min_silence_len_ms = self.params.min_silence_len_ms,
            silence_thresh_db = self.params.silence_thresh_db,
            keep_silence_ms = self.params.keep_silence_ms,
            "Detecting silence and splitting..."
        );
        let phrases = self.segment(&waveform);
        info!("Found {} phrases!", phrases.len());

        let outcome = self.exporter.export(
            &waveform,
            &phrases,
            &self.params.output_dir,
            &self.params.base_name,
        )?;

        let mut report = SplitReport {
            input: input.to_path_buf(),
            sample_rate: waveform.sample_rate(),
            channels: waveform.channels(),
            duration_ms: waveform.duration_ms(),
            output_format: self.exporter.format(),
            phrase_count: phrases.len(),
            written: Vec::new(),
            failed: Vec::new(),
            manifest: None,
            started_at,
            finished_at: started_at,
        };
        report.record_outcome(&outcome);

        if self.params.write_manifest {
            let path = self
                .params
                .output_dir
                .join(manifest_file_name(&self.params.base_name));
            match Manifest::from_chunks(input, &outcome.written).write(&path) {
                Ok(()) => {
                    info!(path = %path.display(), "Manifest written");
                    report.manifest = Some(path);
                }
                Err(e) => warn!(path = %path.display(), error = %e, "Failed to write manifest"),
            }
        }

        report.finished_at = Utc::now();
        if outcome.is_complete() {
            info!(chunks = outcome.written.len(), "Done!");
        } else {
            warn!(
                written = outcome.written.len(),
                failed = outcome.failed.len(),
                "Done with export failures"
            );
        }

        Ok(report)
    }
}
