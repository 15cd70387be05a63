use once_cell::sync::Lazy;
use regex::Regex;

use crate::shared::timestamp::parse_timestamp;
use crate::transcript::domain::segment::Segment;

static TIMESTAMPED_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[(\d{2}:\d{2}:\d{2}\.\d{3}) --> (\d{2}:\d{2}:\d{2}\.\d{3})\] (.*)")
        .expect("timestamped line pattern is valid")
});

static LEADING_ANNOTATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[[^\]]+\]\s*").expect("annotation pattern is valid"));

/// A whisper.cpp output line of the form `[hh:mm:ss.mmm --> hh:mm:ss.mmm] text`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimestampedLine<'a> {
    pub start: &'a str,
    pub end: &'a str,
    pub text: &'a str,
}

impl<'a> TimestampedLine<'a> {
    /// Matches a single line after trimming surrounding whitespace.
    pub fn parse(line: &'a str) -> Option<Self> {
        let caps = TIMESTAMPED_LINE.captures(line.trim())?;
        Some(Self {
            start: caps.get(1)?.as_str(),
            end: caps.get(2)?.as_str(),
            text: caps.get(3)?.as_str(),
        })
    }

    pub fn to_segment(&self) -> Option<Segment> {
        Some(Segment::new(
            parse_timestamp(self.start)?,
            parse_timestamp(self.end)?,
            self.text.trim(),
        ))
    }
}

/// Removes a leading `[...]` annotation and the whitespace after it.
pub fn strip_leading_annotation(line: &str) -> &str {
    match LEADING_ANNOTATION.find(line) {
        Some(m) => &line[m.end()..],
        None => line,
    }
}

/// Joins every non-empty line with its leading annotation removed.
pub fn recover_plain_text(raw: &str) -> String {
    raw.lines()
        .filter(|line| !line.trim().is_empty())
        .map(strip_leading_annotation)
        .collect::<Vec<_>>()
        .join(" ")
}
