use std::io;
use std::path::{Path, PathBuf};

/// Makes `path` absolute against the current directory without touching the
/// filesystem otherwise.
pub fn absolute_path(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_path_keeps_absolute() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(absolute_path(tmp.path()).unwrap(), tmp.path());
    }

    #[test]
    fn test_absolute_path_joins_relative() {
        let resolved = absolute_path(Path::new("models/ggml-base.bin")).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("models/ggml-base.bin"));
    }
}
