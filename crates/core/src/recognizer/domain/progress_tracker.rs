use once_cell::sync::Lazy;
use regex::Regex;

use crate::shared::timestamp::seconds_from_parts;

static SEGMENT_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[(\d{2}):(\d{2}):(\d{2})\.(\d{3}) -->").expect("segment start pattern is valid")
});

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Progress {
    pub percent: u8,
    pub message: String,
}

/// Converts the segment start printed on each streamed line into a
/// percentage of the transcribed range.
#[derive(Clone, Copy, Debug)]
pub struct ProgressTracker {
    range_start: f64,
    range_end: f64,
}

impl ProgressTracker {
    pub fn new(range_start: f64, range_end: f64) -> Self {
        Self {
            range_start,
            range_end,
        }
    }

    /// Start boundary of the segment announced by `line`, in seconds.
    pub fn elapsed_seconds(line: &str) -> Option<f64> {
        let caps = SEGMENT_START.captures(line)?;
        let part = |i: usize| caps[i].parse::<u64>().ok();
        Some(seconds_from_parts(part(1)?, part(2)?, part(3)?, part(4)?))
    }

    /// Unclamped `floor(100 * (elapsed - start) / (end - start))`.
    ///
    /// `None` for an empty or inverted range.
    pub fn raw_percent(&self, elapsed: f64) -> Option<i64> {
        let span = self.range_end - self.range_start;
        if span <= 0.0 {
            return None;
        }
        Some((100.0 * (elapsed - self.range_start) / span).floor() as i64)
    }

    /// Lines without a segment timestamp produce no update.
    pub fn update(&self, line: &str) -> Option<Progress> {
        let elapsed = Self::elapsed_seconds(line)?;
        let percent = self.raw_percent(elapsed)?.clamp(0, 100) as u8;
        Some(Progress {
            percent,
            message: format!("Transcribing: {percent}%"),
        })
    }
}
