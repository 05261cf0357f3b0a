//! Implementation of the `gitgym progress` command

use gitgym_core::{Config, GitGymError, load_all_exercises};

use crate::commands::progress_store;
use crate::output;

/// Show per-topic and overall completion counts
pub fn run_progress(config: &Config) -> Result<i32, GitGymError> {
    let exercises = load_all_exercises(&config.library_dir)?;
    let doc = progress_store(config).load()?;
    output::print_progress_summary(&exercises, &doc);
    Ok(0)
}
