//! Implementation of the `gitgym describe` command

use gitgym_core::{Config, GitGymError};

use crate::commands::current_target;
use crate::output;

/// Print the current exercise's description and goal
pub fn run_describe(config: &Config) -> Result<i32, GitGymError> {
    let Some(target) = current_target(config)? else {
        return Ok(1);
    };
    output::print_exercise_header(&target);
    Ok(0)
}
