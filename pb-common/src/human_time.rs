//! Human-readable duration formatting and ms/frame conversions

/// Format a millisecond duration as seconds with two decimals.
///
/// Every length uses this form, including long clips (`125.50s`).
///
/// # Examples
///
/// ```
/// use pb_common::human_time::format_duration_ms;
///
/// assert_eq!(format_duration_ms(2100), "2.10s");
/// assert_eq!(format_duration_ms(0), "0.00s");
/// assert_eq!(format_duration_ms(125_500), "125.50s");
/// ```
pub fn format_duration_ms(ms: u64) -> String {
    format!("{:.2}s", ms as f64 / 1000.0)
}

/// Convert a frame count at `sample_rate` to whole milliseconds (floor).
///
/// Returns 0 for a zero sample rate rather than dividing by zero.
pub fn frames_to_ms(frames: u64, sample_rate: u32) -> u64 {
    if sample_rate == 0 {
        return 0;
    }
    frames.saturating_mul(1000) / sample_rate as u64
}

/// Convert whole milliseconds to a frame position at `sample_rate` (floor).
pub fn ms_to_frames(ms: u64, sample_rate: u32) -> u64 {
    ms.saturating_mul(sample_rate as u64) / 1000
}
