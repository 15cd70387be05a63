use std::path::Path;

use crate::diarization::domain::diarizer::Diarizer;
use crate::recognizer::domain::transcription_options::TranscriptionOptions;
use crate::subtitles::domain::srt_formatter::SrtFormatter;
use crate::transcript::domain::timestamped_line::TimestampedLine;
use crate::transcript::domain::transcription_result::TranscriptionResult;

/// Turns a finished transcription into the text handed to the user:
/// speaker-merged text when a diarizer is configured, otherwise SRT or
/// plain dialogue.
pub struct RenderTranscriptUseCase {
    diarizer: Option<Box<dyn Diarizer>>,
}

impl RenderTranscriptUseCase {
    pub fn new(diarizer: Option<Box<dyn Diarizer>>) -> Self {
        Self { diarizer }
    }

    /// `options` are the ones the job ran with; their subtitles flag picks
    /// SRT over plain dialogue.
    pub fn render(
        &self,
        source: &Path,
        result: &TranscriptionResult,
        options: &TranscriptionOptions,
        on_progress: &mut dyn FnMut(u8, &str),
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let subtitles = options.generate_subtitles();
        if let Some(ref diarizer) = self.diarizer {
            let srt = subtitles_for(result);
            return diarizer.merge(source, &srt, !subtitles, on_progress);
        }
        if subtitles {
            return Ok(subtitles_for(result));
        }
        if result.raw_output.lines().any(|l| TimestampedLine::parse(l).is_some()) {
            Ok(SrtFormatter::to_plain_text(&result.raw_output))
        } else {
            Ok(result.plain_text.clone())
        }
    }
}

/// SRT from the streamed lines, or from the parsed segments when stdout
/// carried none.
fn subtitles_for(result: &TranscriptionResult) -> String {
    let srt = SrtFormatter::whisper_output_to_srt(&result.raw_output);
    if srt.is_empty() {
        SrtFormatter::segments_to_srt(&result.segments)
    } else {
        srt
    }
}
