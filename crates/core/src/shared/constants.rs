use std::time::Duration;

/// Prompt passed to whisper.cpp on every run.
pub const RECOGNIZER_PROMPT: &str =
    "Always use punctuation. Do not use dashes to indicate dialog. Do not censor any words.";

#[cfg(windows)]
pub const RECOGNIZER_EXECUTABLE_NAME: &str = "whisper-cli.exe";
#[cfg(not(windows))]
pub const RECOGNIZER_EXECUTABLE_NAME: &str = "whisper-cli";

pub const DEFAULT_MODEL_NAME: &str = "base";
pub const DEFAULT_MODELS_DIR: &str = "models/whisper";
pub const DEFAULT_LANGUAGE: &str = "auto";

pub const DEFAULT_BEAM_SIZE: u8 = 5;
pub const MIN_BEAM_SIZE: u8 = 1;
pub const MAX_BEAM_SIZE: u8 = 8;

/// Upper bound on how long the job waits for a stdout line before re-checking
/// cancellation.
pub const OUTPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How long a cancelled job waits for the stderr drain to hand back its buffer.
pub const DIAGNOSTIC_GRACE_PERIOD: Duration = Duration::from_millis(500);

pub const TRIMMED_AUDIO_FILENAME: &str = "trimmed.wav";
