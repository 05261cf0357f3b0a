//! Implementation of the `gitgym reset` command

use std::fs;

use gitgym_core::exercise::find_by_name;
use gitgym_core::{Config, GitGymError, load_all_exercises, run_setup};

use crate::commands::{current_target, progress_store};
use crate::output;

/// Reset one exercise (re-run its setup, clear its record) or, with `all`,
/// delete the whole workspace and the progress file.
pub fn run_reset(config: &Config, name: Option<String>, all: bool) -> Result<i32, GitGymError> {
    let store = progress_store(config);

    if all {
        if config.workspace_dir.exists() {
            fs::remove_dir_all(&config.workspace_dir)?;
        }
        store.reset_all()?;
        output::print_success("All exercises reset. Progress cleared.");
        return Ok(0);
    }

    let target = match name {
        Some(name) => {
            let exercises = load_all_exercises(&config.library_dir)?;
            match find_by_name(&exercises, &name) {
                Some(exercise) => exercise.clone(),
                None => {
                    output::print_error(&format!("Error: No exercise named '{}' found.", name));
                    eprintln!("Run 'gitgym list' to see available exercises.");
                    return Ok(1);
                }
            }
        }
        None => {
            let Some(target) = current_target(config)? else {
                return Ok(1);
            };
            target
        }
    };

    run_setup(&target, config)?;
    store.reset_one(&target.key())?;
    output::print_success(&format!("Exercise '{}' has been reset.", target.name));
    Ok(0)
}
