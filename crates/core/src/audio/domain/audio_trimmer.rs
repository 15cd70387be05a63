use std::path::Path;

/// Domain interface for preparing the audio handed to the recognizer.
pub trait AudioTrimmer: Send {
    /// Total duration of the audio at `path`, in seconds.
    fn duration(&self, path: &Path) -> Result<f64, Box<dyn std::error::Error + Send + Sync>>;

    /// Writes the `[start, end)` portion of `input` to `output` as a playable file.
    fn trim(
        &self,
        input: &Path,
        output: &Path,
        start: f64,
        end: f64,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
