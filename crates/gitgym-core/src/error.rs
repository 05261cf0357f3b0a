//! Error types for gitgym operations

use std::path::PathBuf;

use thiserror::Error;

/// Core error type for gitgym operations
#[derive(Error, Debug)]
pub enum GitGymError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Progress file exists but cannot be parsed. Never silently replaced
    /// with a default document: that would discard learner progress.
    #[error("progress file {} is not valid progress data: {source}", path.display())]
    MalformedProgress {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// User home directory could not be determined
    #[error("could not determine the user home directory")]
    HomeDirNotFound,

    /// Exercise metadata file exists but cannot be parsed
    #[error("invalid exercise definition {}: {message}", path.display())]
    MalformedExercise { path: PathBuf, message: String },

    /// Workspace for an exercise was never created (or was deleted)
    #[error("exercise workspace not found at {}\nRun 'gitgym reset' to re-create it", path.display())]
    WorkspaceMissing { path: PathBuf },

    /// A setup or verify script is missing from the exercise definition
    #[error("script not found: {}", script.display())]
    ScriptMissing { script: PathBuf },

    /// A setup or verify script exists but is not executable
    #[error("script is not executable: {0}\nFix with: chmod +x {0}", script.display())]
    ScriptNotExecutable { script: PathBuf },

    /// Setup script exited non-zero. This indicates a broken exercise
    /// definition, not a learner mistake.
    #[error("setup script for exercise '{name}' failed (exit code {code}):\n{output}")]
    SetupFailed {
        name: String,
        code: i32,
        output: String,
    },

    /// Filesystem event subscription failed or broke mid-watch
    #[error("filesystem watch error: {0}")]
    Watch(String),
}

impl GitGymError {
    /// Get the exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            GitGymError::Io(_) | GitGymError::MalformedProgress { .. } => 2,
            GitGymError::HomeDirNotFound => 3,
            GitGymError::MalformedExercise { .. }
            | GitGymError::ScriptMissing { .. }
            | GitGymError::ScriptNotExecutable { .. }
            | GitGymError::SetupFailed { .. } => 4,
            GitGymError::WorkspaceMissing { .. } => 5,
            GitGymError::Watch(_) => 6,
        }
    }
}
