//! Persisted learner progress
//!
//! The whole document is loaded, one targeted change is applied, and the
//! whole document is written back. gitgym is single-user and single-process,
//! so the read-modify-write pattern needs no locking; atomicity is the
//! wholesale rewrite of `progress.json`.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GitGymError;

/// Schema tag written into every document. Reserved for future migrations,
/// not currently interpreted on load.
pub const SCHEMA_VERSION: u32 = 1;

/// Per-exercise progress status. An absent record means `NotStarted`; the
/// store never writes a record just to say "not started".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::NotStarted => write!(f, "not_started"),
            Status::InProgress => write!(f, "in_progress"),
            Status::Completed => write!(f, "completed"),
        }
    }
}

/// Mutable per-exercise state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    #[serde(default)]
    pub status: Status,
    /// Set when transitioning to `in_progress`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
    /// Set when transitioning to `completed`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub hints_used: u32,
}

/// The sole persisted aggregate: exercise key -> progress record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressDocument {
    pub version: u32,
    #[serde(default)]
    pub exercises: BTreeMap<String, ExerciseRecord>,
}

impl Default for ProgressDocument {
    fn default() -> Self {
        Self {
            version: SCHEMA_VERSION,
            exercises: BTreeMap::new(),
        }
    }
}

/// Handle to the progress document at a fixed path
#[derive(Debug, Clone)]
pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document. A missing file yields the default empty document;
    /// an unparsable file is a surfaced error.
    pub fn load(&self) -> Result<ProgressDocument, GitGymError> {
        if !self.path.exists() {
            return Ok(ProgressDocument::default());
        }
        let content = fs::read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|source| GitGymError::MalformedProgress {
            path: self.path.clone(),
            source,
        })
    }

    /// Serialize and write the whole document, creating parent directories
    /// as needed.
    pub fn save(&self, doc: &ProgressDocument) -> Result<(), GitGymError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content =
            serde_json::to_string_pretty(doc).map_err(|source| GitGymError::MalformedProgress {
                path: self.path.clone(),
                source,
            })?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    /// Status for a key; `NotStarted` when the key was never written
    pub fn status_of(&self, key: &str) -> Result<Status, GitGymError> {
        let doc = self.load()?;
        Ok(doc.exercises.get(key).map(|r| r.status).unwrap_or_default())
    }

    /// Set `status = in_progress` and stamp `started_at`, preserving all
    /// other fields
    pub fn mark_in_progress(&self, key: &str) -> Result<(), GitGymError> {
        self.update(key, |record| {
            record.status = Status::InProgress;
            record.started_at = Some(now_rfc3339());
        })
    }

    /// Set `status = completed` and stamp `completed_at`, preserving all
    /// other fields
    pub fn mark_completed(&self, key: &str) -> Result<(), GitGymError> {
        self.update(key, |record| {
            record.status = Status::Completed;
            record.completed_at = Some(now_rfc3339());
        })
    }

    /// Increment the hint counter, creating the record at 1 if absent
    pub fn increment_hints(&self, key: &str) -> Result<(), GitGymError> {
        self.update(key, |record| {
            record.hints_used += 1;
        })
    }

    /// Remove the record for `key` entirely. No-op when absent: afterwards
    /// the key is indistinguishable from never-started either way.
    pub fn reset_one(&self, key: &str) -> Result<(), GitGymError> {
        let mut doc = self.load()?;
        if doc.exercises.remove(key).is_some() {
            self.save(&doc)?;
        }
        Ok(())
    }

    /// Delete the backing file entirely; no-op when it does not exist
    pub fn reset_all(&self) -> Result<(), GitGymError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    /// Key of the exercise the learner is currently working on: the
    /// `in_progress` record with the latest `started_at`
    pub fn current_exercise(&self) -> Result<Option<String>, GitGymError> {
        let doc = self.load()?;
        Ok(doc
            .exercises
            .iter()
            .filter(|(_, record)| record.status == Status::InProgress)
            .max_by(|a, b| a.1.started_at.cmp(&b.1.started_at))
            .map(|(key, _)| key.clone()))
    }

    /// Load -> apply one targeted change -> save. The record is created
    /// default-empty when absent, and the closure only touches the fields it
    /// means to change, so unrelated fields survive every mutation.
    fn update(&self, key: &str, apply: impl FnOnce(&mut ExerciseRecord)) -> Result<(), GitGymError> {
        let mut doc = self.load()?;
        let record = doc.exercises.entry(key.to_string()).or_default();
        apply(record);
        self.save(&doc)
    }
}

/// RFC 3339 UTC timestamp with a trailing `Z`
fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn store_in(dir: &Path) -> ProgressStore {
        ProgressStore::new(dir.join("progress.json"))
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let temp = tempfile::tempdir().unwrap();
        let doc = store_in(temp.path()).load().unwrap();
        assert_eq!(doc.version, SCHEMA_VERSION);
        assert!(doc.exercises.is_empty());
    }

    #[test]
    fn test_load_malformed_file_is_an_error() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_in(temp.path());
        fs::write(store.path(), "{ not json").unwrap();
        assert!(matches!(
            store.load(),
            Err(GitGymError::MalformedProgress { .. })
        ));
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let temp = tempfile::tempdir().unwrap();
        let store = ProgressStore::new(temp.path().join("nested/dir/progress.json"));
        store.save(&ProgressDocument::default()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_save_load_round_trip() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_in(temp.path());

        let mut doc = ProgressDocument::default();
        doc.exercises.insert(
            "01_basics/01_init".to_string(),
            ExerciseRecord {
                status: Status::Completed,
                started_at: Some("2026-02-16T10:00:00Z".to_string()),
                completed_at: Some("2026-02-16T10:30:00Z".to_string()),
                hints_used: 2,
            },
        );
        doc.exercises.insert(
            "01_basics/02_staging".to_string(),
            ExerciseRecord {
                status: Status::InProgress,
                started_at: Some("2026-02-17T09:00:00Z".to_string()),
                completed_at: None,
                hints_used: 0,
            },
        );

        store.save(&doc).unwrap();
        assert_eq!(store.load().unwrap(), doc);
    }

    #[test]
    fn test_absent_timestamps_are_omitted_from_json() {
        let record = ExerciseRecord {
            status: Status::InProgress,
            started_at: Some("2026-02-16T10:00:00Z".to_string()),
            completed_at: None,
            hints_used: 0,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("started_at"));
        assert!(!json.contains("completed_at"));
        assert!(json.contains(r#""status":"in_progress""#));
    }

    #[test]
    fn test_status_of_defaults_to_not_started() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_in(temp.path());
        assert_eq!(store.status_of("01_basics/01_init").unwrap(), Status::NotStarted);
    }

    #[test]
    fn test_status_of_missing_status_field_is_not_started() {
        // A record without a status field reads as not_started
        let temp = tempfile::tempdir().unwrap();
        let store = store_in(temp.path());
        fs::write(
            store.path(),
            r#"{"version":1,"exercises":{"01_basics/01_init":{"hints_used":1}}}"#,
        )
        .unwrap();
        assert_eq!(store.status_of("01_basics/01_init").unwrap(), Status::NotStarted);
    }

    #[test]
    fn test_mark_in_progress_sets_status_and_timestamp() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_in(temp.path());
        store.mark_in_progress("01_basics/01_init").unwrap();

        let doc = store.load().unwrap();
        let record = &doc.exercises["01_basics/01_init"];
        assert_eq!(record.status, Status::InProgress);
        let started_at = record.started_at.as_ref().expect("started_at is set");
        let parsed = DateTime::parse_from_rfc3339(started_at).expect("timestamp parses");
        assert_eq!(parsed.offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_mark_in_progress_preserves_hints_used() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_in(temp.path());
        store.increment_hints("01_basics/01_init").unwrap();
        store.increment_hints("01_basics/01_init").unwrap();
        store.mark_in_progress("01_basics/01_init").unwrap();

        let doc = store.load().unwrap();
        let record = &doc.exercises["01_basics/01_init"];
        assert_eq!(record.status, Status::InProgress);
        assert_eq!(record.hints_used, 2);
    }

    #[test]
    fn test_mark_completed_sets_status_and_timestamp() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_in(temp.path());
        store.mark_in_progress("01_basics/01_init").unwrap();
        store.mark_completed("01_basics/01_init").unwrap();

        let doc = store.load().unwrap();
        let record = &doc.exercises["01_basics/01_init"];
        assert_eq!(record.status, Status::Completed);
        assert!(record.completed_at.is_some());
        // started_at from the earlier transition survives
        assert!(record.started_at.is_some());
    }

    #[test]
    fn test_mark_completed_preserves_hints_used() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_in(temp.path());
        for _ in 0..3 {
            store.increment_hints("01_basics/01_init").unwrap();
        }
        store.mark_completed("01_basics/01_init").unwrap();

        let doc = store.load().unwrap();
        assert_eq!(doc.exercises["01_basics/01_init"].hints_used, 3);
    }

    #[test]
    fn test_increment_hints_counts_from_absent_key() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_in(temp.path());
        for _ in 0..4 {
            store.increment_hints("01_basics/01_init").unwrap();
        }
        let doc = store.load().unwrap();
        assert_eq!(doc.exercises["01_basics/01_init"].hints_used, 4);
    }

    #[test]
    fn test_reset_one_removes_the_record() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_in(temp.path());
        store.mark_completed("01_basics/01_init").unwrap();
        store.increment_hints("01_basics/01_init").unwrap();

        store.reset_one("01_basics/01_init").unwrap();
        assert_eq!(store.status_of("01_basics/01_init").unwrap(), Status::NotStarted);
        assert!(!store.load().unwrap().exercises.contains_key("01_basics/01_init"));
    }

    #[test]
    fn test_reset_one_absent_key_is_a_noop() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_in(temp.path());
        store.reset_one("01_basics/01_init").unwrap();
        assert_eq!(store.load().unwrap(), ProgressDocument::default());
    }

    #[test]
    fn test_reset_one_leaves_other_records_alone() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_in(temp.path());
        store.mark_completed("01_basics/01_init").unwrap();
        store.mark_in_progress("01_basics/02_staging").unwrap();

        store.reset_one("01_basics/01_init").unwrap();
        assert_eq!(
            store.status_of("01_basics/02_staging").unwrap(),
            Status::InProgress
        );
    }

    #[test]
    fn test_reset_all_deletes_backing_file() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_in(temp.path());
        store.mark_completed("01_basics/01_init").unwrap();
        assert!(store.path().exists());

        store.reset_all().unwrap();
        assert!(!store.path().exists());
        assert_eq!(store.load().unwrap(), ProgressDocument::default());
    }

    #[test]
    fn test_reset_all_without_file_is_a_noop() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_in(temp.path());
        store.reset_all().unwrap();
        assert_eq!(store.load().unwrap(), ProgressDocument::default());
    }

    #[test]
    fn test_current_exercise_none_when_nothing_in_progress() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_in(temp.path());
        assert_eq!(store.current_exercise().unwrap(), None);

        store.mark_completed("01_basics/01_init").unwrap();
        assert_eq!(store.current_exercise().unwrap(), None);
    }

    #[test]
    fn test_current_exercise_is_latest_started() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_in(temp.path());

        let mut doc = ProgressDocument::default();
        doc.exercises.insert(
            "01_basics/01_init".to_string(),
            ExerciseRecord {
                status: Status::InProgress,
                started_at: Some("2026-02-16T10:00:00Z".to_string()),
                ..Default::default()
            },
        );
        doc.exercises.insert(
            "01_basics/02_staging".to_string(),
            ExerciseRecord {
                status: Status::InProgress,
                started_at: Some("2026-02-17T10:00:00Z".to_string()),
                ..Default::default()
            },
        );
        store.save(&doc).unwrap();

        assert_eq!(
            store.current_exercise().unwrap().as_deref(),
            Some("01_basics/02_staging")
        );
    }

    #[test]
    fn test_status_serialization_snake_case() {
        assert_eq!(serde_json::to_string(&Status::InProgress).unwrap(), r#""in_progress""#);
        assert_eq!(serde_json::to_string(&Status::NotStarted).unwrap(), r#""not_started""#);
        assert_eq!(Status::Completed.to_string(), "completed");
    }
}
