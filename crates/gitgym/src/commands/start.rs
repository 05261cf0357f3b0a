//! Implementation of the `gitgym start` and `gitgym next` commands

use gitgym_core::exercise::find_by_name;
use gitgym_core::progress::ProgressDocument;
use gitgym_core::{Config, Exercise, GitGymError, Status, load_all_exercises, run_setup};

use crate::commands::progress_store;
use crate::output;

/// Run the start command. With no name, starts the first exercise that is
/// not yet completed.
pub fn run_start(config: &Config, name: Option<String>) -> Result<i32, GitGymError> {
    let exercises = load_all_exercises(&config.library_dir)?;
    let store = progress_store(config);

    let target = match name {
        Some(name) => match find_by_name(&exercises, &name) {
            Some(exercise) => exercise.clone(),
            None => {
                output::print_error(&format!("Error: No exercise named '{}' found.", name));
                eprintln!("Run 'gitgym list' to see available exercises.");
                return Ok(1);
            }
        },
        None => {
            let doc = store.load()?;
            match next_incomplete(&exercises, &doc) {
                Some(exercise) => exercise.clone(),
                None => {
                    output::print_success("All exercises are completed! Great work.");
                    return Ok(0);
                }
            }
        }
    };

    run_setup(&target, config)?;
    store.mark_in_progress(&target.key())?;

    let workspace = target.workspace_path(config);
    output::print_info(&format!("Exercise directory: {}", workspace.display()));
    println!("  cd {}\n", workspace.display());
    output::print_exercise_header(&target);
    Ok(0)
}

/// First exercise in curriculum order that is not completed
fn next_incomplete<'a>(
    exercises: &'a [Exercise],
    doc: &ProgressDocument,
) -> Option<&'a Exercise> {
    exercises.iter().find(|exercise| {
        doc.exercises
            .get(&exercise.key())
            .map(|record| record.status)
            .unwrap_or_default()
            != Status::Completed
    })
}
