use once_cell::sync::Lazy;
use regex::Regex;

static TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2,}):(\d{2}):(\d{2})[.,](\d{3})$").expect("timestamp pattern is valid")
});

/// Converts clock components to elapsed seconds.
pub fn seconds_from_parts(hours: u64, minutes: u64, seconds: u64, millis: u64) -> f64 {
    (hours * 3600 + minutes * 60 + seconds) as f64 + millis as f64 / 1000.0
}

/// Parses `hh:mm:ss.mmm` (or the SRT form `hh:mm:ss,mmm`) into seconds.
pub fn parse_timestamp(text: &str) -> Option<f64> {
    let caps = TIMESTAMP.captures(text.trim())?;
    let part = |i: usize| caps[i].parse::<u64>().ok();
    Some(seconds_from_parts(part(1)?, part(2)?, part(3)?, part(4)?))
}

/// Formats seconds as `hh:mm:ss<sep>mmm`, rounded to the nearest millisecond.
///
/// Negative and non-finite inputs render as zero.
pub fn format_timestamp(seconds: f64, separator: char) -> String {
    let ms = if seconds.is_finite() && seconds > 0.0 {
        (seconds * 1000.0).round() as u64
    } else {
        0
    };
    let hours = ms / 3_600_000;
    let mins = (ms % 3_600_000) / 60_000;
    let secs = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;
    format!("{hours:02}:{mins:02}:{secs:02}{separator}{millis:03}")
}
