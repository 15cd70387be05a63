use serde::Deserialize;

use crate::transcript::domain::segment::Segment;
use crate::transcript::domain::timestamped_line::{recover_plain_text, TimestampedLine};

/// Segments and the dialogue text derived from one recognizer run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedTranscript {
    pub segments: Vec<Segment>,
    pub plain_text: String,
}

#[derive(Deserialize)]
struct StructuredDocument {
    segments: Option<Vec<SegmentRecord>>,
    transcription: Option<Vec<WhisperRecord>>,
}

#[derive(Deserialize)]
struct SegmentRecord {
    start: Option<f64>,
    end: Option<f64>,
    text: Option<String>,
}

/// Entry of the document whisper.cpp writes with `-oj`.
#[derive(Deserialize)]
struct WhisperRecord {
    offsets: Option<Offsets>,
    text: Option<String>,
}

/// Millisecond offsets relative to the start of the audio.
#[derive(Deserialize)]
struct Offsets {
    from: u64,
    to: u64,
}

impl StructuredDocument {
    fn into_segments(self) -> Option<Vec<Segment>> {
        if let Some(records) = self.segments {
            return Some(
                records
                    .into_iter()
                    .map(|r| {
                        let start = r.start.unwrap_or(0.0);
                        Segment::new(start, r.end.unwrap_or(start), trimmed(r.text))
                    })
                    .collect(),
            );
        }
        self.transcription.map(|records| {
            records
                .into_iter()
                .map(|r| {
                    let (from, to) = r.offsets.map_or((0, 0), |o| (o.from, o.to));
                    Segment::new(from as f64 / 1000.0, to as f64 / 1000.0, trimmed(r.text))
                })
                .collect()
        })
    }
}

fn trimmed(text: Option<String>) -> String {
    text.map(|t| t.trim().to_string()).unwrap_or_default()
}

/// Turns recognizer output into segments and plain text.
///
/// Structured (JSON) output is preferred. Anything that is not a document
/// with a segment list degrades to line-based text recovery, which never
/// yields segments. Parsing never fails.
pub struct SegmentParser;

impl SegmentParser {
    pub fn parse(raw: &str) -> ParsedTranscript {
        let raw = raw.trim();
        if raw.is_empty() {
            return ParsedTranscript::default();
        }

        let segments = match serde_json::from_str::<StructuredDocument>(raw) {
            Ok(doc) => doc.into_segments(),
            Err(e) => {
                log::debug!("Recognizer output is not structured, recovering text from lines: {e}");
                None
            }
        };

        match segments {
            Some(segments) => {
                let plain_text = segments
                    .iter()
                    .map(|s| s.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                ParsedTranscript {
                    segments,
                    plain_text,
                }
            }
            None => ParsedTranscript {
                segments: Vec::new(),
                plain_text: recover_plain_text(raw),
            },
        }
    }

    /// Recovers segments from `[start --> end] text` lines, skipping every
    /// other line.
    pub fn parse_timestamped_lines(raw: &str) -> Vec<Segment> {
        raw.lines()
            .filter_map(TimestampedLine::parse)
            .filter_map(|line| line.to_segment())
            .collect()
    }
}
