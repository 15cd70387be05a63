use crate::shared::timestamp::format_timestamp;
use crate::transcript::domain::segment::Segment;
use crate::transcript::domain::timestamped_line::{recover_plain_text, TimestampedLine};

/// Renders recognizer output as SubRip subtitles or as plain dialogue.
///
/// Each SRT block is the block number, the `hh:mm:ss,mmm --> hh:mm:ss,mmm`
/// range, the text and a blank separator, all joined with `\n`.
pub struct SrtFormatter;

impl SrtFormatter {
    /// Converts `[start --> end] text` lines to SRT. Lines without a
    /// timestamp pair are skipped and do not consume a block number.
    pub fn to_srt<'a, I>(lines: I) -> String
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut parts = Vec::new();
        let mut counter = 1;
        for line in lines {
            let Some(line) = TimestampedLine::parse(line) else {
                continue;
            };
            push_block(
                &mut parts,
                counter,
                &line.start.replace('.', ","),
                &line.end.replace('.', ","),
                line.text,
            );
            counter += 1;
        }
        parts.join("\n")
    }

    /// Converts the full stdout of a whisper.cpp run to SRT.
    pub fn whisper_output_to_srt(raw: &str) -> String {
        Self::to_srt(raw.trim().lines())
    }

    pub fn segments_to_srt(segments: &[Segment]) -> String {
        let mut parts = Vec::new();
        for (i, seg) in segments.iter().enumerate() {
            push_block(
                &mut parts,
                i + 1,
                &format_timestamp(seg.start, ','),
                &format_timestamp(seg.end, ','),
                &seg.text,
            );
        }
        parts.join("\n")
    }

    /// Strips the leading `[...]` annotation from every non-empty line and
    /// joins the rest with single spaces.
    pub fn to_plain_text(raw: &str) -> String {
        recover_plain_text(raw)
    }
}

fn push_block(parts: &mut Vec<String>, number: usize, start: &str, end: &str, text: &str) {
    parts.push(number.to_string());
    parts.push(format!("{start} --> {end}"));
    parts.push(text.trim().to_string());
    parts.push(String::new());
}
