//! File-backed timeframe preference.
//!
//! Keeps the last explicitly chosen timeframe in a small text file so that
//! consecutive command-line runs share it.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use graphwatch_graphite::{GraphiteError, PreferenceStore};

/// A preference stored as a single line in a file.
#[derive(Debug, Clone)]
pub struct FilePreference {
    path: PathBuf,
}

impl FilePreference {
    /// Create a preference backed by `path`. The file is created on first write.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the backing path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FilePreference {
    fn get(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let value = content.trim();
                (!value.is_empty()).then(|| value.to_string())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read timeframe preference");
                None
            }
        }
    }

    fn set(&mut self, timeframe: &str) -> Result<(), GraphiteError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, format!("{}\n", timeframe))?;
        Ok(())
    }
}
