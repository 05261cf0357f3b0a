//! Workspace change detection and the watch-mode verify loop
//!
//! Watch mode observes an exercise workspace and re-runs verification on
//! every detected change until the goal is met or the user cancels. Change
//! detection has two interchangeable strategies: a polling snapshot
//! comparison (always available) and a native event subscription behind the
//! `events` feature. Both yield one signal per distinct change and shut down
//! cleanly when the cancellation flag is set.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, SystemTime};

use walkdir::WalkDir;

use crate::config::Config;
use crate::error::GitGymError;
use crate::exercise::Exercise;
use crate::runner::{self, VerifyOutcome};

/// Seconds between polls. Verify cycles are human-paced, so one second is
/// plenty of resolution.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Mapping of file path to last-modified time for all regular files under a
/// watched directory at one point in time
pub type Snapshot = BTreeMap<PathBuf, SystemTime>;

/// Collect the current snapshot. A missing directory yields an empty
/// snapshot; if the directory appears later, that is itself a change.
pub fn collect_mtimes(dir: &Path) -> Snapshot {
    let mut snapshot = Snapshot::new();
    if !dir.exists() {
        return snapshot;
    }
    for entry in WalkDir::new(dir).into_iter().filter_map(Result::ok) {
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(meta) = entry.metadata() else { continue };
        let Ok(modified) = meta.modified() else { continue };
        snapshot.insert(entry.into_path(), modified);
    }
    snapshot
}

/// Any difference counts: file added, removed, or mtime changed. Content is
/// deliberately not hashed; mtime equality is the definition of "unchanged".
pub fn has_changed(previous: &Snapshot, current: &Snapshot) -> bool {
    previous != current
}

/// One wakeup from a change source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeSignal {
    /// Something changed since the last signal
    Changed,
    /// The cancellation flag was set; the source released its resources
    Cancelled,
}

/// A blocking source of change signals over one directory tree.
///
/// Implementations yield exactly one `Changed` per distinct observed change
/// and return `Cancelled` promptly once the flag is set. No queue of discrete
/// events is kept: only "some change happened since last check".
pub trait ChangeSource {
    fn next_change(&mut self, cancelled: &AtomicBool) -> Result<ChangeSignal, GitGymError>;
}

/// Polling strategy: sleep, re-snapshot, compare
pub struct PollingSource {
    dir: PathBuf,
    interval: Duration,
    previous: Snapshot,
}

impl PollingSource {
    /// Takes the baseline snapshot immediately so changes made after
    /// construction are detected on the first poll.
    pub fn new(dir: impl Into<PathBuf>, interval: Duration) -> Self {
        let dir = dir.into();
        let previous = collect_mtimes(&dir);
        Self {
            dir,
            interval,
            previous,
        }
    }
}

impl ChangeSource for PollingSource {
    fn next_change(&mut self, cancelled: &AtomicBool) -> Result<ChangeSignal, GitGymError> {
        loop {
            if cancelled.load(Ordering::SeqCst) {
                return Ok(ChangeSignal::Cancelled);
            }
            thread::sleep(self.interval);
            if cancelled.load(Ordering::SeqCst) {
                return Ok(ChangeSignal::Cancelled);
            }
            let current = collect_mtimes(&self.dir);
            let changed = has_changed(&self.previous, &current);
            self.previous = current;
            if changed {
                return Ok(ChangeSignal::Changed);
            }
        }
    }
}

/// Event-subscription strategy over the `notify` crate. Semantically
/// interchangeable with polling: all delivered events between wakeups
/// coalesce into a single `Changed` signal.
#[cfg(feature = "events")]
pub struct EventSource {
    // Held for the subscription's lifetime; dropping it unsubscribes.
    _watcher: notify::RecommendedWatcher,
    rx: std::sync::mpsc::Receiver<notify::Result<notify::Event>>,
}

#[cfg(feature = "events")]
impl EventSource {
    /// The subscription mechanism requires the directory to exist, so it is
    /// created first (polling tolerates an absent directory natively).
    pub fn new(dir: &Path) -> Result<Self, GitGymError> {
        use notify::{RecursiveMode, Watcher};

        std::fs::create_dir_all(dir)?;
        let (tx, rx) = std::sync::mpsc::channel();
        let mut watcher =
            notify::recommended_watcher(tx).map_err(|e| GitGymError::Watch(e.to_string()))?;
        watcher
            .watch(dir, RecursiveMode::Recursive)
            .map_err(|e| GitGymError::Watch(e.to_string()))?;
        Ok(Self {
            _watcher: watcher,
            rx,
        })
    }
}

#[cfg(feature = "events")]
impl ChangeSource for EventSource {
    fn next_change(&mut self, cancelled: &AtomicBool) -> Result<ChangeSignal, GitGymError> {
        use std::sync::mpsc::RecvTimeoutError;

        loop {
            if cancelled.load(Ordering::SeqCst) {
                return Ok(ChangeSignal::Cancelled);
            }
            match self.rx.recv_timeout(Duration::from_millis(200)) {
                Ok(Ok(_event)) => {
                    // Drain whatever else queued up: one signal per wakeup.
                    while self.rx.try_recv().is_ok() {}
                    return Ok(ChangeSignal::Changed);
                }
                Ok(Err(e)) => return Err(GitGymError::Watch(e.to_string())),
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(GitGymError::Watch("event channel closed".to_string()));
                }
            }
        }
    }
}

/// Pick the change strategy once at startup: event subscription when the
/// `events` feature is compiled in and the subscription can be established,
/// polling otherwise.
pub fn default_source(dir: &Path) -> Box<dyn ChangeSource> {
    #[cfg(feature = "events")]
    if let Ok(source) = EventSource::new(dir) {
        return Box::new(source);
    }
    Box::new(PollingSource::new(dir, POLL_INTERVAL))
}

/// Progress notifications emitted while the watch loop runs
#[derive(Debug, Clone, PartialEq)]
pub enum WatchEvent {
    /// Verification produced output to display verbatim
    Output(String),
    /// Verification ran and the goal is not met yet
    GoalNotMet,
    /// Verification succeeded; emitted exactly once, then the loop stops
    Completed,
}

/// How the watch loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchOutcome {
    Completed,
    Cancelled,
}

/// The watch state machine: wait for a change, verify, report, and either
/// stop on success or keep waiting. Generic over the source and the verify
/// call so the loop is testable without a real workspace.
///
/// Verification runs synchronously, exactly once per detected change; a
/// change made while verification runs is seen on the next iteration.
pub fn drive<S, V, F>(
    source: &mut S,
    cancelled: &AtomicBool,
    mut verify: V,
    mut on_event: F,
) -> Result<WatchOutcome, GitGymError>
where
    S: ChangeSource + ?Sized,
    V: FnMut() -> Result<VerifyOutcome, GitGymError>,
    F: FnMut(WatchEvent),
{
    loop {
        match source.next_change(cancelled)? {
            ChangeSignal::Cancelled => return Ok(WatchOutcome::Cancelled),
            ChangeSignal::Changed => {
                let outcome = verify()?;
                if !outcome.output.is_empty() {
                    on_event(WatchEvent::Output(outcome.output.clone()));
                }
                if outcome.success {
                    on_event(WatchEvent::Completed);
                    return Ok(WatchOutcome::Completed);
                }
                on_event(WatchEvent::GoalNotMet);
            }
        }
    }
}

/// Watch an exercise's workspace and re-verify until the goal is met or the
/// cancellation flag is set. A workspace that does not exist at start time
/// is an immediate error (the exercise environment was never created), not a
/// silent hang.
pub fn watch_and_verify(
    exercise: &Exercise,
    config: &Config,
    cancelled: &AtomicBool,
    on_event: impl FnMut(WatchEvent),
) -> Result<WatchOutcome, GitGymError> {
    let workspace = exercise.workspace_path(config);
    if !workspace.exists() {
        return Err(GitGymError::WorkspaceMissing { path: workspace });
    }
    let mut source = default_source(&workspace);
    drive(
        source.as_mut(),
        cancelled,
        || runner::run_verify(exercise, config),
        on_event,
    )
}
