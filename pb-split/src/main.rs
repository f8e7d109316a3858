//! pb-split - silence-based phrase splitter
//!
//! Splits one spoken-word recording into numbered phrase clips.
//!
//! **Usage:**
//! ```bash
//! pb-split great.m4a --output-dir assets --format mp3
//! ```
//!
//! Exit codes: 0 when every chunk was written (including zero phrases),
//! 1 on a fatal error, 2 when one or more chunks failed.

use anyhow::{Context, Result};
use clap::Parser;
use pb_common::config::{load_config, TomlConfig};
use pb_split::models::{OutputFormat, SplitParameters};
use pb_split::{Pipeline, SplitReport};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "pb-split")]
#[command(about = "Split a spoken-word recording into phrase clips at silence gaps")]
#[command(version)]
struct Args {
    /// Input audio file (MP3, M4A/AAC, FLAC, WAV, OGG)
    input: PathBuf,

    /// Directory receiving the chunks
    #[arg(short, long, env = "PB_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Chunk file name prefix
    #[arg(short, long)]
    base_name: Option<String>,

    /// Output format (wav or mp3)
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Minimum silence length separating phrases (ms)
    #[arg(long, env = "PB_MIN_SILENCE_LEN_MS")]
    min_silence_len: Option<u64>,

    /// Silence threshold (dBFS)
    #[arg(long, env = "PB_SILENCE_THRESH_DB", allow_hyphen_values = true)]
    silence_thresh: Option<f64>,

    /// Silence kept at each phrase boundary (ms)
    #[arg(long, env = "PB_KEEP_SILENCE_MS")]
    keep_silence: Option<u64>,

    /// Loudness analysis window (ms)
    #[arg(long)]
    window: Option<u64>,

    /// Also write a JSON manifest of the written chunks
    #[arg(long)]
    manifest: bool,

    /// Path to TOML config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the run report as JSON instead of the summary
    #[arg(long)]
    json: bool,
}

impl Args {
    /// Layer the command-line values over config-derived parameters
    fn apply_to(&self, params: &mut SplitParameters) {
        if let Some(v) = &self.output_dir {
            params.output_dir = v.clone();
        }
        if let Some(v) = &self.base_name {
            params.base_name = v.clone();
        }
        if let Some(v) = self.format {
            params.output_format = v;
        }
        if let Some(v) = self.min_silence_len {
            params.min_silence_len_ms = v;
        }
        if let Some(v) = self.silence_thresh {
            params.silence_thresh_db = v;
        }
        if let Some(v) = self.keep_silence {
            params.keep_silence_ms = v;
        }
        if let Some(v) = self.window {
            params.window_ms = v;
        }
        if self.manifest {
            params.write_manifest = true;
        }
    }
}

fn init_tracing(config: &TomlConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn build_parameters(args: &Args, config: &TomlConfig) -> Result<SplitParameters> {
    let mut params = SplitParameters::default();
    params
        .apply_overrides(&config.split)
        .context("Invalid [split] configuration")?;
    args.apply_to(&mut params);
    Ok(params)
}

fn run(args: &Args) -> Result<SplitReport> {
    let (config, source) =
        load_config(args.config.as_deref()).context("Failed to load configuration")?;
    // Level comes from the config; its source is reported once logging is up
    init_tracing(&config);
    source.log();

    let params = build_parameters(args, &config)?;
    info!(
        output_dir = %params.output_dir.display(),
        format = %params.output_format,
        base_name = %params.base_name,
        "pb-split starting"
    );

    let pipeline = Pipeline::new(params).context("Failed to set up pipeline")?;
    let report = pipeline
        .run(&args.input)
        .with_context(|| format!("Failed to split {}", args.input.display()))?;
    Ok(report)
}

fn main() -> ExitCode {
    let args = Args::parse();

    let report = match run(&args) {
        Ok(report) => report,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            return ExitCode::from(1);
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: failed to serialize report: {e}");
                return ExitCode::from(1);
            }
        }
    } else {
        println!("{report}");
    }

    if report.is_complete() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pb_common::config::parse_toml_config;

    #[test]
    fn test_cli_overrides_config() {
        let config = parse_toml_config(
            r#"
            [split]
            keep_silence_ms = 50
            silence_thresh_db = -35.0
            output_format = "wav"
            "#,
        )
        .unwrap();
        let args = Args::parse_from(["pb-split", "in.m4a", "--keep-silence", "200", "--manifest"]);

        let params = build_parameters(&args, &config).unwrap();
        assert_eq!(params.keep_silence_ms, 200);
        assert_eq!(params.silence_thresh_db, -35.0);
        assert_eq!(params.output_format, OutputFormat::Wav);
        assert!(params.write_manifest);
        assert_eq!(params.min_silence_len_ms, 500);
    }

    #[test]
    fn test_negative_threshold_flag() {
        let args = Args::parse_from(["pb-split", "in.wav", "--silence-thresh", "-45", "-f", "mp3"]);
        assert_eq!(args.silence_thresh, Some(-45.0));
        assert_eq!(args.format, Some(OutputFormat::Mp3));
    }

    #[test]
    fn test_bad_config_format_rejected() {
        let config = parse_toml_config("[split]\noutput_format = \"ogg\"\n").unwrap();
        let args = Args::parse_from(["pb-split", "in.wav"]);
        assert!(build_parameters(&args, &config).is_err());
    }
}
