//! gitgym-core: exercise discovery, progress tracking, and watch mode
//!
//! This crate provides the foundational types and logic for the gitgym
//! trainer. The CLI crate layers argument parsing and terminal output on top.

/// Core error types for gitgym operations
pub mod error;

/// Per-user path configuration
pub mod config;

/// Exercise records and library discovery
pub mod exercise;

/// Persisted learner progress
pub mod progress;

/// Setup and verify script invocation
pub mod runner;

/// Workspace change detection and the watch loop
pub mod watcher;

// Re-exports for convenience
pub use config::Config;
pub use error::GitGymError;
pub use exercise::{Exercise, load_all_exercises};
pub use progress::{ExerciseRecord, ProgressDocument, ProgressStore, Status};
pub use runner::{VerifyOutcome, run_setup, run_verify};
pub use watcher::{ChangeSignal, ChangeSource, PollingSource, WatchEvent, WatchOutcome, watch_and_verify};
