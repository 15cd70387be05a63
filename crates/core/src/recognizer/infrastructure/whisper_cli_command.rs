use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::recognizer::domain::transcription_options::{Task, TranscriptionOptions};
use crate::shared::constants::{RECOGNIZER_EXECUTABLE_NAME, RECOGNIZER_PROMPT};
use crate::shared::paths::absolute_path;

/// A fully resolved whisper.cpp command line.
///
/// Argument order is fixed:
/// `-m <model> -f <audio> -bs <beam> -pp -l <lang> -oj --prompt <prompt> [-translate]`.
#[derive(Clone, Debug, PartialEq)]
pub struct WhisperCliCommand {
    executable: PathBuf,
    args: Vec<OsString>,
}

impl WhisperCliCommand {
    pub fn new(
        executable: &Path,
        model_path: &Path,
        audio_path: &Path,
        options: &TranscriptionOptions,
    ) -> Self {
        let mut args: Vec<OsString> = vec![
            "-m".into(),
            model_path.into(),
            "-f".into(),
            audio_path.into(),
            "-bs".into(),
            options.beam_size().to_string().into(),
            "-pp".into(),
            "-l".into(),
            options.language().into(),
            "-oj".into(),
            "--prompt".into(),
            RECOGNIZER_PROMPT.into(),
        ];
        if options.task() == Task::Translate {
            args.push("-translate".into());
        }
        Self {
            executable: executable.to_path_buf(),
            args,
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Builds a `Command` with stdout and stderr piped and stdin closed.
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.executable);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }
}

impl std::fmt::Display for WhisperCliCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.executable.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Resolves the configured executable to an absolute path. A directory is
/// taken to contain `whisper-cli` (`whisper-cli.exe` on Windows).
pub fn resolve_executable(configured: &Path) -> io::Result<PathBuf> {
    let path = if configured.is_dir() {
        configured.join(RECOGNIZER_EXECUTABLE_NAME)
    } else {
        configured.to_path_buf()
    };
    absolute_path(&path)
}

/// Resolves the model file: an identifier naming an existing file is used
/// directly, otherwise `<models_dir>/ggml-<model>.bin`.
pub fn resolve_model_path(options: &TranscriptionOptions) -> io::Result<PathBuf> {
    let direct = Path::new(options.model());
    let path = if direct.is_file() {
        direct.to_path_buf()
    } else {
        options
            .models_dir()
            .join(format!("ggml-{}.bin", options.model()))
    };
    absolute_path(&path)
}
