use crate::transcript::domain::segment::Segment;

/// Everything one recognizer run produced. Built once when the job ends.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TranscriptionResult {
    /// Recognizer stdout, trimmed.
    pub raw_output: String,
    pub plain_text: String,
    pub segments: Vec<Segment>,
    /// Duration of the full input, before trimming.
    pub audio_duration: f64,
    /// Recognizer stderr, verbatim.
    pub diagnostic_output: String,
    pub cancelled: bool,
    /// `None` when the process was killed or never started.
    pub exit_code: Option<i32>,
}

impl TranscriptionResult {
    pub fn has_text(&self) -> bool {
        !self.plain_text.trim().is_empty()
    }
}
