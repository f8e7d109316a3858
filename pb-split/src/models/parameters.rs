//! Splitter parameters
//!
//! Every option carries a named default. `validate()` runs at pipeline entry.

use pb_common::config::SplitOverrides;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::SplitError;

/// Container/codec written for every chunk of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// 16-bit PCM WAV, written natively
    Wav,
    /// MP3 via ffmpeg/libmp3lame
    Mp3,
}

impl OutputFormat {
    /// File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Wav => "wav",
            OutputFormat::Mp3 => "mp3",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wav" => Ok(OutputFormat::Wav),
            "mp3" => Ok(OutputFormat::Mp3),
            other => Err(format!("unsupported output format '{other}' (expected wav or mp3)")),
        }
    }
}

/// Phrase splitting parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SplitParameters {
    /// Minimum silent run that separates phrases, in ms (default: 500)
    #[serde(default = "default_min_silence_len_ms")]
    pub min_silence_len_ms: u64,

    /// Loudness ceiling for a silent window, in dBFS (default: -40.0)
    #[serde(default = "default_silence_thresh_db")]
    pub silence_thresh_db: f64,

    /// Silence retained at each phrase boundary, in ms (default: 100)
    #[serde(default = "default_keep_silence_ms")]
    pub keep_silence_ms: u64,

    /// Loudness profiler window, in ms (default: 10)
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,

    /// Directory receiving the chunks (default: "assets")
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// File name prefix; chunks are `{base_name}{index}.{ext}` (default: "phrase")
    #[serde(default = "default_base_name")]
    pub base_name: String,

    /// Output format for every chunk (default: mp3)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    /// Write a JSON manifest next to the chunks (default: false)
    #[serde(default)]
    pub write_manifest: bool,
}

// Default value functions
fn default_min_silence_len_ms() -> u64 {
    500
}

fn default_silence_thresh_db() -> f64 {
    -40.0
}

fn default_keep_silence_ms() -> u64 {
    100
}

fn default_window_ms() -> u64 {
    10
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("assets")
}

fn default_base_name() -> String {
    "phrase".to_string()
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Mp3
}

impl Default for SplitParameters {
    fn default() -> Self {
        Self {
            min_silence_len_ms: default_min_silence_len_ms(),
            silence_thresh_db: default_silence_thresh_db(),
            keep_silence_ms: default_keep_silence_ms(),
            window_ms: default_window_ms(),
            output_dir: default_output_dir(),
            base_name: default_base_name(),
            output_format: default_output_format(),
            write_manifest: false,
        }
    }
}

impl SplitParameters {
    /// Check every option; the first violation is reported
    pub fn validate(&self) -> Result<(), SplitError> {
        if self.window_ms == 0 {
            return Err(SplitError::InvalidParameters(
                "window_ms must be at least 1".to_string(),
            ));
        }
        if self.min_silence_len_ms == 0 {
            return Err(SplitError::InvalidParameters(
                "min_silence_len_ms must be at least 1".to_string(),
            ));
        }
        if !self.silence_thresh_db.is_finite() || self.silence_thresh_db > 0.0 {
            return Err(SplitError::InvalidParameters(format!(
                "silence_thresh_db must be a finite value <= 0 dBFS, got {}",
                self.silence_thresh_db
            )));
        }
        if self.base_name.trim().is_empty() {
            return Err(SplitError::InvalidParameters(
                "base_name must not be empty".to_string(),
            ));
        }
        if self.base_name.contains(['/', '\\']) {
            return Err(SplitError::InvalidParameters(format!(
                "base_name must not contain a path separator: {}",
                self.base_name
            )));
        }
        Ok(())
    }

    /// Apply `[split]` table overrides from the TOML config
    pub fn apply_overrides(&mut self, overrides: &SplitOverrides) -> Result<(), SplitError> {
        if let Some(v) = overrides.min_silence_len_ms {
            self.min_silence_len_ms = v;
        }
        if let Some(v) = overrides.silence_thresh_db {
            self.silence_thresh_db = v;
        }
        if let Some(v) = overrides.keep_silence_ms {
            self.keep_silence_ms = v;
        }
        if let Some(v) = overrides.window_ms {
            self.window_ms = v;
        }
        if let Some(v) = &overrides.output_dir {
            self.output_dir = v.clone();
        }
        if let Some(v) = &overrides.base_name {
            self.base_name = v.clone();
        }
        if let Some(v) = &overrides.output_format {
            self.output_format = v.parse().map_err(SplitError::InvalidParameters)?;
        }
        if let Some(v) = overrides.write_manifest {
            self.write_manifest = v;
        }
        Ok(())
    }
}
