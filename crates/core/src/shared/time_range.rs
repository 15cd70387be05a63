use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum TimeRangeError {
    #[error("invalid time '{0}': expected HH:MM:SS, MM:SS or seconds")]
    InvalidFormat(String),
    #[error("start time {start:.3}s must be before end time {end:.3}s")]
    Empty { start: f64, end: f64 },
}

/// The portion of the input audio to transcribe.
///
/// `end == None` means "until the end of the audio".
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TimeRange {
    start: f64,
    end: Option<f64>,
}

impl TimeRange {
    pub fn new(start: f64, end: Option<f64>) -> Self {
        Self {
            start: start.max(0.0),
            end,
        }
    }

    pub fn full() -> Self {
        Self::default()
    }

    /// Parses user-entered bounds. An empty start is zero; an empty or
    /// `"end"` end runs to the end of the audio.
    pub fn parse(start: &str, end: &str) -> Result<Self, TimeRangeError> {
        let start = match start.trim() {
            "" => 0.0,
            s => parse_clock(s)?,
        };
        let end = match end.trim() {
            "" => None,
            e if e.eq_ignore_ascii_case("end") => None,
            e => Some(parse_clock(e)?),
        };
        Ok(Self::new(start, end))
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> Option<f64> {
        self.end
    }

    /// Resolves the range against the audio duration, clamping the end to
    /// the duration.
    pub fn resolve(&self, duration: f64) -> Result<(f64, f64), TimeRangeError> {
        let end = self.end.map_or(duration, |e| e.min(duration));
        if self.start >= end {
            return Err(TimeRangeError::Empty {
                start: self.start,
                end,
            });
        }
        Ok((self.start, end))
    }
}

/// Parses `HH:MM:SS(.fff)`, `MM:SS(.fff)` or plain seconds.
pub fn parse_clock(text: &str) -> Result<f64, TimeRangeError> {
    let invalid = || TimeRangeError::InvalidFormat(text.to_string());
    let parts: Vec<&str> = text.trim().split(':').collect();
    if parts.is_empty() || parts.len() > 3 {
        return Err(invalid());
    }

    let (whole, last) = parts.split_at(parts.len() - 1);
    let seconds: f64 = last[0].parse().map_err(|_| invalid())?;
    if !seconds.is_finite() || seconds < 0.0 || (!whole.is_empty() && seconds >= 60.0) {
        return Err(invalid());
    }

    let mut total = 0u64;
    for (i, field) in whole.iter().enumerate() {
        let value: u64 = field.parse().map_err(|_| invalid())?;
        // Minutes are bounded only when hours are present.
        if i > 0 && value >= 60 {
            return Err(invalid());
        }
        total = total * 60 + value;
    }
    Ok(total as f64 * 60.0 + seconds)
}
