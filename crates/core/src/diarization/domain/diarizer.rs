use std::path::Path;

/// Domain interface for attributing subtitle blocks to speakers.
///
/// The algorithm is opaque to the pipeline: it receives the source audio
/// and SRT text and returns the merged transcript.
pub trait Diarizer: Send {
    fn merge(
        &self,
        audio_path: &Path,
        srt: &str,
        remove_timestamps: bool,
        on_progress: &mut dyn FnMut(u8, &str),
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}
