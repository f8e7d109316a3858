//! Test Helper Utilities
//!
//! Shared utilities for testing pb-split

#![allow(dead_code)]

pub mod audio_generator;
pub mod log_capture;

pub use audio_generator::{generate_test_wav, AudioConfig, Segment};
pub use log_capture::{capture_logs, LogCapture};
