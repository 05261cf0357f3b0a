//! Setup and verify script invocation
//!
//! Each exercise ships a `setup.sh` that builds the workspace git repository
//! and a `verify.sh` that checks the goal state. Both receive the workspace
//! path as `$1` and run synchronously; the core applies no retry policy.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use crate::config::Config;
use crate::error::GitGymError;
use crate::exercise::Exercise;

/// Structured result of one verification call.
///
/// `is_script_error` distinguishes a broken exercise environment (missing
/// workspace or script, unexpected exit code) from the learner simply not
/// having met the goal yet. Exit code 1 is the conventional "goal not met"
/// signal from verify scripts.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifyOutcome {
    pub success: bool,
    pub output: String,
    pub is_script_error: bool,
}

impl VerifyOutcome {
    fn script_error(output: String) -> Self {
        Self {
            success: false,
            output,
            is_script_error: true,
        }
    }
}

/// Run the exercise's setup script, creating the workspace directory first.
/// A missing, non-executable, or failing script is an error: that is a bug in
/// the exercise definition, not a learner mistake.
pub fn run_setup(exercise: &Exercise, config: &Config) -> Result<(), GitGymError> {
    let script = exercise.setup_script();
    if !script.exists() {
        return Err(GitGymError::ScriptMissing { script });
    }
    if !is_executable(&script) {
        return Err(GitGymError::ScriptNotExecutable { script });
    }

    let workspace = exercise.workspace_path(config);
    fs::create_dir_all(&workspace)?;

    let output = Command::new(&script).arg(&workspace).output()?;
    if !output.status.success() {
        return Err(GitGymError::SetupFailed {
            name: exercise.name.clone(),
            code: output.status.code().unwrap_or(-1),
            output: combined_output(&output),
        });
    }
    Ok(())
}

/// Run the exercise's verify script against its workspace.
///
/// Environment problems (missing workspace, missing or non-executable
/// script) are reported inside the outcome rather than as errors, so watch
/// mode and the `verify` command can display them and decide what to do.
pub fn run_verify(exercise: &Exercise, config: &Config) -> Result<VerifyOutcome, GitGymError> {
    let workspace = exercise.workspace_path(config);
    if !workspace.exists() {
        return Ok(VerifyOutcome::script_error(format!(
            "Exercise repo not found at {}.\nRun 'gitgym reset' to re-create it.",
            workspace.display()
        )));
    }

    let script = exercise.verify_script();
    if !script.exists() {
        return Ok(VerifyOutcome::script_error(format!(
            "Error: verify.sh not found for exercise '{}' at {}",
            exercise.name,
            script.display()
        )));
    }
    if !is_executable(&script) {
        return Ok(VerifyOutcome::script_error(format!(
            "Error: verify.sh for exercise '{}' is not executable.\nFix with: chmod +x {}",
            exercise.name,
            script.display()
        )));
    }

    let output = Command::new(&script).arg(&workspace).output()?;
    let success = output.status.success();
    let is_script_error = !success && output.status.code() != Some(1);
    Ok(VerifyOutcome {
        success,
        output: combined_output(&output),
        is_script_error,
    })
}

fn combined_output(output: &Output) -> String {
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    text.trim().to_string()
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path)
        .map(|meta| meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(_path: &Path) -> bool {
    true
}
