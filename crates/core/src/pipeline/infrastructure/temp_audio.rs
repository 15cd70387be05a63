use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::shared::constants::TRIMMED_AUDIO_FILENAME;

/// Job-owned scratch directory holding the trimmed audio and anything the
/// recognizer writes next to it.
///
/// Removed on drop. Removal failures are logged, never raised.
pub struct TempAudio {
    dir: Option<TempDir>,
    audio_path: PathBuf,
}

impl TempAudio {
    pub fn create() -> io::Result<Self> {
        let dir = tempfile::Builder::new().prefix("scribe-").tempdir()?;
        let audio_path = dir.path().join(TRIMMED_AUDIO_FILENAME);
        Ok(Self {
            dir: Some(dir),
            audio_path,
        })
    }

    pub fn audio_path(&self) -> &Path {
        &self.audio_path
    }

    /// Where whisper.cpp writes its `-oj` document: `<audio>.json`.
    pub fn sidecar_path(&self) -> PathBuf {
        let mut name = self.audio_path.as_os_str().to_os_string();
        name.push(".json");
        PathBuf::from(name)
    }
}

impl Drop for TempAudio {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take() {
            let path = dir.path().to_path_buf();
            match dir.close() {
                Ok(()) => log::debug!("Removed temporary audio {}", path.display()),
                Err(e) => log::warn!("Failed to remove temporary audio {}: {e}", path.display()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_removes_directory_and_contents() {
        let temp = TempAudio::create().unwrap();
        std::fs::write(temp.audio_path(), b"RIFF").unwrap();
        std::fs::write(temp.sidecar_path(), b"{}").unwrap();
        let dir = temp.audio_path().parent().unwrap().to_path_buf();
        assert!(dir.exists());

        drop(temp);
        assert!(!dir.exists());
    }

    #[test]
    fn test_sidecar_appends_json_extension() {
        let temp = TempAudio::create().unwrap();
        let sidecar = temp.sidecar_path();
        assert_eq!(
            sidecar.file_name().unwrap().to_string_lossy(),
            format!("{TRIMMED_AUDIO_FILENAME}.json")
        );
    }

    #[test]
    fn test_drop_tolerates_already_removed_directory() {
        let temp = TempAudio::create().unwrap();
        let dir = temp.audio_path().parent().unwrap().to_path_buf();
        std::fs::remove_dir_all(&dir).unwrap();
        drop(temp);
        assert!(!dir.exists());
    }
}
