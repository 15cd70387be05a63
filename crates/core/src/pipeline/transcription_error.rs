use std::path::PathBuf;

use thiserror::Error;

use crate::pipeline::job_control::JobState;
use crate::shared::time_range::TimeRangeError;

#[derive(Error, Debug)]
pub enum TranscriptionError {
    #[error("job has already run (state: {0})")]
    AlreadyRun(JobState),
    #[error("input file not found: {0}")]
    InputNotFound(PathBuf),
    #[error("whisper model not found: {0}")]
    ModelNotFound(PathBuf),
    #[error("failed to resolve path against the working directory: {0}")]
    WorkingDirectory(#[source] std::io::Error),
    #[error(transparent)]
    TimeRange(#[from] TimeRangeError),
    #[error("failed to prepare audio: {0}")]
    AudioPreparation(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("failed to create temporary audio directory: {0}")]
    TempAudio(#[source] std::io::Error),
    #[error("failed to launch recognizer {path}: {source}")]
    Launch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read recognizer output: {source}\n{diagnostics}")]
    Stream {
        #[source]
        source: std::io::Error,
        diagnostics: String,
    },
    #[error("failed to wait for recognizer: {0}")]
    Wait(#[source] std::io::Error),
    #[error("{0} thread panicked")]
    WorkerPanicked(&'static str),
}
