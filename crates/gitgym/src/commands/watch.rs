//! Implementation of the `gitgym watch` command

use std::sync::atomic::{AtomicBool, Ordering};

use gitgym_core::watcher::{WatchEvent, WatchOutcome, watch_and_verify};
use gitgym_core::{Config, GitGymError};

use crate::commands::{current_target, progress_store};
use crate::output;

/// Flag set by the Ctrl+C handler; the watch loop polls it and stops cleanly
static CANCELLED: AtomicBool = AtomicBool::new(false);

fn setup_ctrl_c_handler() {
    static HANDLER_SET: AtomicBool = AtomicBool::new(false);

    if HANDLER_SET.swap(true, Ordering::SeqCst) {
        return;
    }

    if let Err(e) = ctrlc::set_handler(|| {
        CANCELLED.store(true, Ordering::SeqCst);
        eprintln!();
    }) {
        output::print_warning(&format!("Warning: Could not set Ctrl+C handler: {}", e));
    }
}

/// Watch the current exercise's workspace and re-verify on every change
/// until the goal is met or the user presses Ctrl-C.
pub fn run_watch(config: &Config) -> Result<i32, GitGymError> {
    let Some(target) = current_target(config)? else {
        return Ok(1);
    };

    setup_ctrl_c_handler();
    CANCELLED.store(false, Ordering::SeqCst);

    output::print_info(&format!(
        "Watching {} for changes. Press Ctrl-C to stop.",
        target.workspace_path(config).display()
    ));

    let result = watch_and_verify(&target, config, &CANCELLED, |event| match event {
        WatchEvent::Output(text) => println!("{}", text),
        WatchEvent::GoalNotMet => output::print_warning("Not quite right yet. Keep trying!"),
        WatchEvent::Completed => {}
    });

    match result {
        Ok(WatchOutcome::Completed) => {
            progress_store(config).mark_completed(&target.key())?;
            output::print_success("Exercise complete! Great work.");
            Ok(0)
        }
        Ok(WatchOutcome::Cancelled) => {
            output::print_info("Watch mode stopped.");
            Ok(0)
        }
        Err(e @ GitGymError::WorkspaceMissing { .. }) => {
            output::print_error(&e.to_string());
            Ok(1)
        }
        Err(e) => Err(e),
    }
}
