//! Implementation of the `gitgym verify` command

use gitgym_core::{Config, GitGymError};

use crate::commands::{current_target, progress_store};
use crate::output;

/// Check whether the current exercise's goal state is met; mark it
/// completed on success.
pub fn run_verify(config: &Config) -> Result<i32, GitGymError> {
    let Some(target) = current_target(config)? else {
        return Ok(1);
    };

    let outcome = gitgym_core::run_verify(&target, config)?;
    if !outcome.output.is_empty() {
        println!("{}", outcome.output);
    }

    if outcome.success {
        progress_store(config).mark_completed(&target.key())?;
        output::print_success("Exercise complete! Great work.");
        Ok(0)
    } else if outcome.is_script_error {
        output::print_error(
            "The verify script encountered an unexpected error.\n\
             Try 'gitgym reset' to restore the exercise.",
        );
        Ok(1)
    } else {
        output::print_warning("Not quite right yet. Keep trying!");
        Ok(1)
    }
}
