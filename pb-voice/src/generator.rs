//! Concurrent phrase generation
//!
//! Every phrase is synthesized and written independently. One failure does
//! not cancel or fail the others; the caller gets one result per phrase, in
//! input order.

use futures::future::join_all;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::{Result, SynthesisError};
use crate::synthesizer::SpeechSynthesizer;
use crate::voice::{ReferencePhrase, VoiceSettings};

/// A phrase written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPhrase {
    pub text: String,
    pub path: PathBuf,
    pub bytes: usize,
}

/// Synthesize every phrase concurrently and write each into `out_dir`.
///
/// Empty phrases fail before any service call is made. `out_dir` is created
/// if missing; if that fails every phrase reports the write error.
pub async fn generate_phrases<S>(
    synthesizer: &S,
    phrases: &[ReferencePhrase],
    settings: &VoiceSettings,
    out_dir: &Path,
) -> Vec<Result<GeneratedPhrase>>
where
    S: SpeechSynthesizer + ?Sized,
{
    info!(
        voice = %settings.voice_id,
        rate = %settings.rate_string(),
        pitch = %settings.pitch_string(),
        count = phrases.len(),
        "Generating phrases"
    );

    if let Err(e) = tokio::fs::create_dir_all(out_dir).await {
        warn!(path = %out_dir.display(), error = %e, "Failed to create output directory");
        return phrases
            .iter()
            .map(|p| {
                Err(SynthesisError::Write {
                    path: out_dir.join(&p.file_name),
                    source: std::io::Error::new(e.kind(), e.to_string()),
                })
            })
            .collect();
    }

    let tasks = phrases
        .iter()
        .map(|phrase| generate_one(synthesizer, phrase, settings, out_dir));
    let results = join_all(tasks).await;

    let ok = results.iter().filter(|r| r.is_ok()).count();
    if ok == results.len() {
        info!(count = ok, "All phrases generated successfully!");
    } else {
        warn!(generated = ok, failed = results.len() - ok, "Some phrases failed");
    }
    results
}

async fn generate_one<S>(
    synthesizer: &S,
    phrase: &ReferencePhrase,
    settings: &VoiceSettings,
    out_dir: &Path,
) -> Result<GeneratedPhrase>
where
    S: SpeechSynthesizer + ?Sized,
{
    if phrase.text.trim().is_empty() {
        return Err(SynthesisError::EmptyText {
            file_name: phrase.file_name.clone(),
        });
    }

    let path = out_dir.join(&phrase.file_name);
    let result = async {
        let audio = synthesizer.synthesize(&phrase.text, settings).await?;
        if audio.is_empty() {
            return Err(SynthesisError::NoAudio {
                text: phrase.text.clone(),
            });
        }
        tokio::fs::write(&path, &audio)
            .await
            .map_err(|source| SynthesisError::Write {
                path: path.clone(),
                source,
            })?;
        Ok(audio.len())
    }
    .await;

    match result {
        Ok(bytes) => {
            info!(path = %path.display(), "Generated: {} - '{}'", phrase.file_name, phrase.text);
            Ok(GeneratedPhrase {
                text: phrase.text.clone(),
                path,
                bytes,
            })
        }
        Err(e) => {
            warn!(file_name = %phrase.file_name, error = %e, "Phrase generation failed");
            Err(e)
        }
    }
}
