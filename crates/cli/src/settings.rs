use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use scribe_core::shared::constants::{DEFAULT_BEAM_SIZE, DEFAULT_LANGUAGE, DEFAULT_MODEL_NAME};

#[cfg(windows)]
const BUNDLED_WHISPER_DIR: &str = "Whisper_win-x64";
#[cfg(not(windows))]
const BUNDLED_WHISPER_DIR: &str = "Whisper_lin-x64";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub whisper_path: PathBuf,
    pub model: String,
    pub beam_size: u8,
    pub language: String,
    pub last_dir: Option<PathBuf>,
}

/// whisper.cpp build shipped next to the executable.
fn default_whisper_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_default()
        .join(BUNDLED_WHISPER_DIR)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            whisper_path: default_whisper_path(),
            model: DEFAULT_MODEL_NAME.to_string(),
            beam_size: DEFAULT_BEAM_SIZE,
            language: DEFAULT_LANGUAGE.to_string(),
            last_dir: None,
        }
    }
}

impl Settings {
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("Scribe").join("settings.json"))
    }

    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Missing or unreadable files yield the defaults.
    pub fn load_from(path: &Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default()
    }

    pub fn save(&self) -> io::Result<PathBuf> {
        let path = Self::config_path().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "no configuration directory")
        })?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
    }
}
