//! Implementation of the `gitgym list` command

use gitgym_core::{Config, GitGymError, load_all_exercises};

use crate::commands::progress_store;
use crate::output;

/// Run the list command
pub fn run_list(config: &Config) -> Result<i32, GitGymError> {
    let exercises = load_all_exercises(&config.library_dir)?;
    let doc = progress_store(config).load()?;
    output::print_exercise_list(&exercises, &doc);
    Ok(0)
}
