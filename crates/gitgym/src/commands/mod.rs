//! CLI command implementations

pub mod describe;
pub mod hint;
pub mod list;
pub mod progress;
pub mod reset;
pub mod start;
pub mod verify;
pub mod watch;

pub use describe::run_describe;
pub use hint::run_hint;
pub use list::run_list;
pub use progress::run_progress;
pub use reset::run_reset;
pub use start::run_start;
pub use verify::run_verify;
pub use watch::run_watch;

use gitgym_core::exercise::{find_by_key, load_all_exercises};
use gitgym_core::{Config, Exercise, GitGymError, ProgressStore};

use crate::output;

pub(crate) fn progress_store(config: &Config) -> ProgressStore {
    ProgressStore::new(&config.progress_file)
}

/// Resolve the exercise the learner is currently working on. Prints the
/// appropriate guidance and returns `None` when there is no in-progress
/// exercise or its definition has disappeared from the library.
pub(crate) fn current_target(config: &Config) -> Result<Option<Exercise>, GitGymError> {
    let Some(key) = progress_store(config).current_exercise()? else {
        output::print_warning("No exercise is currently in progress.");
        eprintln!("Run 'gitgym start' or 'gitgym list' to begin an exercise.");
        return Ok(None);
    };

    let exercises = load_all_exercises(&config.library_dir)?;
    match find_by_key(&exercises, &key) {
        Some(exercise) => Ok(Some(exercise.clone())),
        None => {
            output::print_error(&format!(
                "Error: Exercise '{}' not found in exercise definitions.",
                key
            ));
            Ok(None)
        }
    }
}
