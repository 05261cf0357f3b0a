//! CLI argument parsing with clap derive

use clap::{Parser, Subcommand};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// gitgym - Learn git through interactive exercises
#[derive(Parser)]
#[command(name = "gitgym")]
#[command(version = VERSION)]
#[command(about = "Learn git through interactive exercises")]
#[command(
    long_about = "Learn git through interactive exercises.\n\ngitgym sets up small git repositories for you to practice on.\n\nEach exercise describes a goal state; you work toward it with ordinary git commands inside the exercise workspace, then verify your result. Progress and hints are tracked per exercise in ~/.gitgym/progress.json."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all exercises grouped by topic, showing completion status
    List,

    /// Set up an exercise repo
    ///
    /// With no name, starts the next incomplete exercise.
    #[command(
        long_about = "Set up an exercise repo.\n\nRuns the exercise's setup script to build a fresh workspace repository and marks the exercise in progress. With no name, starts the first exercise that is not yet completed."
    )]
    Start {
        /// Exercise name (see 'gitgym list')
        exercise: Option<String>,
    },

    /// Start the next incomplete exercise (alias for 'start' with no name)
    Next,

    /// Print the current exercise's description and goal
    Describe,

    /// Check whether the current exercise's goal state is met
    ///
    /// On success the exercise is marked completed.
    Verify,

    /// Show the next progressive hint for the current exercise
    Hint,

    /// Reset an exercise to its initial state
    ///
    /// With --all, deletes the workspace and clears all progress.
    #[command(
        long_about = "Reset an exercise to its initial state.\n\nIf --all is given, deletes the whole workspace and clears all progress.\nIf EXERCISE is given, resets that exercise.\nIf neither is given, resets the current in-progress exercise."
    )]
    Reset {
        /// Exercise name to reset
        exercise: Option<String>,

        /// Reset all exercises and clear progress
        #[arg(long)]
        all: bool,
    },

    /// Watch mode: automatically re-verify on workspace changes
    ///
    /// Runs until the goal is met or Ctrl-C is pressed.
    Watch,

    /// Show overall progress summary
    Progress,
}

/// Get the command args for use in the application
pub fn parse() -> Cli {
    Cli::parse()
}
