use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use thiserror::Error;

use crate::diarization::domain::diarizer::Diarizer;

#[derive(Error, Debug)]
pub enum DiarizationError {
    #[error("failed to stage subtitles for diarization: {0}")]
    Stage(#[source] std::io::Error),
    #[error("failed to launch diarizer {path}: {source}")]
    Launch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("diarizer exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
}

/// Runs an external diarization program.
///
/// Invocation: `<program> <audio_path> <srt_file> [--remove-timestamps]`.
/// The merged transcript is read from the program's stdout.
#[derive(Debug, Clone)]
pub struct CommandDiarizer {
    program: PathBuf,
}

impl CommandDiarizer {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(
        &self,
        audio_path: &Path,
        srt: &str,
        remove_timestamps: bool,
    ) -> Result<String, DiarizationError> {
        let mut srt_file = tempfile::Builder::new()
            .prefix("scribe-")
            .suffix(".srt")
            .tempfile()
            .map_err(DiarizationError::Stage)?;
        srt_file
            .write_all(srt.as_bytes())
            .and_then(|_| srt_file.flush())
            .map_err(DiarizationError::Stage)?;

        let mut cmd = Command::new(&self.program);
        cmd.arg(audio_path).arg(srt_file.path());
        if remove_timestamps {
            cmd.arg("--remove-timestamps");
        }
        let output = cmd
            .stdin(Stdio::null())
            .output()
            .map_err(|source| DiarizationError::Launch {
                path: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(DiarizationError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim_end().to_string())
    }
}

impl Diarizer for CommandDiarizer {
    fn merge(
        &self,
        audio_path: &Path,
        srt: &str,
        remove_timestamps: bool,
        on_progress: &mut dyn FnMut(u8, &str),
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        on_progress(0, "Identifying speakers...");
        log::info!("Running diarizer: {}", self.program.display());
        let merged = self.run(audio_path, srt, remove_timestamps)?;
        on_progress(100, "Speaker identification complete");
        Ok(merged)
    }
}
