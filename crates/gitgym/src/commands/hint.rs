//! Implementation of the `gitgym hint` command

use gitgym_core::{Config, GitGymError};

use crate::commands::{current_target, progress_store};
use crate::output;

/// Show the next progressive hint for the current exercise.
///
/// The hint counter only moves forward when a hint is actually shown, so it
/// never exceeds the number of hints the exercise defines.
pub fn run_hint(config: &Config) -> Result<i32, GitGymError> {
    let Some(target) = current_target(config)? else {
        return Ok(1);
    };

    let key = target.key();
    let store = progress_store(config);
    let doc = store.load()?;
    let used = doc
        .exercises
        .get(&key)
        .map(|record| record.hints_used)
        .unwrap_or(0) as usize;
    let total = target.hints.len();

    if used >= total {
        output::print_warning("No more hints available.");
        return Ok(0);
    }

    println!("Hint {}/{}: {}", used + 1, total, target.hints[used]);
    if used + 1 >= total {
        println!("(No more hints available.)");
    }

    store.increment_hints(&key)?;
    Ok(0)
}
