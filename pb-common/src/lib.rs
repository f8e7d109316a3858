//! # Phrase Button Common Library
//!
//! Shared code for the phrase tooling crates:
//! - Common error type
//! - Configuration loading (TOML file, environment, compiled defaults)
//! - Human-readable duration formatting

pub mod config;
pub mod error;
pub mod human_time;

pub use error::{Error, Result};
