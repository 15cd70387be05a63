use std::fmt;
use std::path::{Path, PathBuf};

use crate::shared::constants::{
    DEFAULT_BEAM_SIZE, DEFAULT_LANGUAGE, DEFAULT_MODELS_DIR, MAX_BEAM_SIZE, MIN_BEAM_SIZE,
};
use crate::shared::time_range::TimeRange;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Task {
    #[default]
    Transcribe,
    /// Translate the speech to English.
    Translate,
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Task::Transcribe => write!(f, "transcribe"),
            Task::Translate => write!(f, "translate"),
        }
    }
}

/// Everything needed to invoke the recognizer for one job.
///
/// Beam size and language are normalized on the way in, so the getters
/// always return values that are safe to pass on the command line.
#[derive(Clone, Debug, PartialEq)]
pub struct TranscriptionOptions {
    executable_path: PathBuf,
    model: String,
    models_dir: PathBuf,
    language: String,
    beam_size: u8,
    task: Task,
    time_range: TimeRange,
    generate_subtitles: bool,
}

impl TranscriptionOptions {
    pub fn new(executable_path: impl Into<PathBuf>, model: impl Into<String>) -> Self {
        Self {
            executable_path: executable_path.into(),
            model: model.into(),
            models_dir: PathBuf::from(DEFAULT_MODELS_DIR),
            language: DEFAULT_LANGUAGE.to_string(),
            beam_size: DEFAULT_BEAM_SIZE,
            task: Task::default(),
            time_range: TimeRange::full(),
            generate_subtitles: false,
        }
    }

    pub fn with_models_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.models_dir = dir.into();
        self
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.language = normalize_language(language);
        self
    }

    pub fn with_beam_size(mut self, beam_size: u32) -> Self {
        self.beam_size = clamp_beam_size(beam_size);
        self
    }

    pub fn with_task(mut self, task: Task) -> Self {
        self.task = task;
        self
    }

    pub fn with_time_range(mut self, range: TimeRange) -> Self {
        self.time_range = range;
        self
    }

    pub fn with_subtitles(mut self, enabled: bool) -> Self {
        self.generate_subtitles = enabled;
        self
    }

    pub fn executable_path(&self) -> &Path {
        &self.executable_path
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn beam_size(&self) -> u8 {
        self.beam_size
    }

    pub fn task(&self) -> Task {
        self.task
    }

    pub fn time_range(&self) -> TimeRange {
        self.time_range
    }

    pub fn generate_subtitles(&self) -> bool {
        self.generate_subtitles
    }
}

pub fn clamp_beam_size(requested: u32) -> u8 {
    requested.clamp(MIN_BEAM_SIZE as u32, MAX_BEAM_SIZE as u32) as u8
}

/// Lowercases the language code; blank input means auto-detect.
pub fn normalize_language(language: &str) -> String {
    let language = language.trim().to_lowercase();
    if language.is_empty() {
        DEFAULT_LANGUAGE.to_string()
    } else {
        language
    }
}
