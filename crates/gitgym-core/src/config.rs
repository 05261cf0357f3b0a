//! Per-user path configuration
//!
//! All paths are carried explicitly so the store, runner, and watcher never
//! consult global state. Tests build a `Config` over temp directories.

use std::env;
use std::path::PathBuf;

use crate::error::GitGymError;

/// Environment variable overriding the exercise library location
pub const LIBRARY_ENV: &str = "GITGYM_LIBRARY";

/// Resolved filesystem locations for one gitgym invocation
#[derive(Debug, Clone)]
pub struct Config {
    /// Read-only exercise definitions (`<topic_dir>/<exercise_dir>/exercise.toml`)
    pub library_dir: PathBuf,
    /// Per-exercise working directories where the learner runs git commands
    pub workspace_dir: PathBuf,
    /// The persisted progress document
    pub progress_file: PathBuf,
}

impl Config {
    /// Build the standard layout under `<home>/.gitgym`
    pub fn from_home(home: impl Into<PathBuf>) -> Self {
        let root = home.into().join(".gitgym");
        Self {
            library_dir: root.join("library"),
            workspace_dir: root.join("exercises"),
            progress_file: root.join("progress.json"),
        }
    }

    /// Resolve the per-user locations, honoring the `GITGYM_LIBRARY` override
    pub fn resolve() -> Result<Self, GitGymError> {
        let home = dirs::home_dir().ok_or(GitGymError::HomeDirNotFound)?;
        let mut config = Self::from_home(home);
        if let Some(library) = env::var_os(LIBRARY_ENV) {
            config.library_dir = PathBuf::from(library);
        }
        Ok(config)
    }
}
