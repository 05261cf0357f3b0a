//! Exercise records and library discovery
//!
//! An exercise lives at `<library>/<topic_dir>/<exercise_dir>/` and consists
//! of an `exercise.toml` metadata file plus `setup.sh` and `verify.sh`
//! scripts. The two directory names form the exercise's progress key.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::config::Config;
use crate::error::GitGymError;

/// One exercise definition, read-only to the rest of the system
#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    /// Short name used on the command line (`gitgym start <name>`)
    pub name: String,
    /// Human topic name (e.g. "Basics")
    pub topic: String,
    /// Human title (e.g. "Initialize a Repository")
    pub title: String,
    /// Full description shown by `describe`
    pub description: String,
    /// One-line goal statement
    pub goal_summary: String,
    /// Ordered progressive hints
    pub hints: Vec<String>,
    /// Definition directory (`<library>/<topic_dir>/<exercise_dir>`)
    pub path: PathBuf,
}

/// On-disk shape of `exercise.toml`
#[derive(Debug, Deserialize)]
struct ExerciseMeta {
    name: String,
    title: String,
    description: String,
    goal_summary: String,
    #[serde(default)]
    hints: Vec<String>,
}

/// On-disk shape of `topic.toml`
#[derive(Debug, Deserialize)]
struct TopicMeta {
    name: String,
}

impl Exercise {
    /// Progress key: `"<topic_dir>/<exercise_dir>"`
    pub fn key(&self) -> String {
        let exercise_dir = self.path.file_name().map(|n| n.to_string_lossy());
        let topic_dir = self
            .path
            .parent()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy());
        match (topic_dir, exercise_dir) {
            (Some(topic), Some(exercise)) => format!("{}/{}", topic, exercise),
            _ => self.name.clone(),
        }
    }

    /// Workspace directory for this exercise under the configured root
    pub fn workspace_path(&self, config: &Config) -> PathBuf {
        let mut workspace = config.workspace_dir.clone();
        if let Some(parent) = self.path.parent().and_then(|p| p.file_name()) {
            workspace.push(parent);
        }
        if let Some(dir) = self.path.file_name() {
            workspace.push(dir);
        }
        workspace
    }

    /// Path to this exercise's setup script
    pub fn setup_script(&self) -> PathBuf {
        self.path.join("setup.sh")
    }

    /// Path to this exercise's verify script
    pub fn verify_script(&self) -> PathBuf {
        self.path.join("verify.sh")
    }
}

/// Discover all exercises under the library directory, ordered by topic
/// directory then exercise directory (the `NN_` prefixes give the curriculum
/// order). Directories without an `exercise.toml` are skipped; a present but
/// unparsable `exercise.toml` is surfaced as an error.
pub fn load_all_exercises(library_dir: &Path) -> Result<Vec<Exercise>, GitGymError> {
    let mut exercises = Vec::new();
    if !library_dir.exists() {
        return Ok(exercises);
    }

    for topic_dir in sorted_subdirs(library_dir)? {
        let topic = topic_name(&topic_dir);
        for exercise_dir in sorted_subdirs(&topic_dir)? {
            let meta_path = exercise_dir.join("exercise.toml");
            if !meta_path.exists() {
                continue;
            }
            let content = fs::read_to_string(&meta_path)?;
            let meta: ExerciseMeta =
                toml::from_str(&content).map_err(|e| GitGymError::MalformedExercise {
                    path: meta_path.clone(),
                    message: e.to_string(),
                })?;
            exercises.push(Exercise {
                name: meta.name,
                topic: topic.clone(),
                title: meta.title,
                description: meta.description,
                goal_summary: meta.goal_summary,
                hints: meta.hints,
                path: exercise_dir,
            });
        }
    }

    Ok(exercises)
}

/// Find an exercise by its short name
pub fn find_by_name<'a>(exercises: &'a [Exercise], name: &str) -> Option<&'a Exercise> {
    exercises.iter().find(|e| e.name == name)
}

/// Find an exercise by its progress key
pub fn find_by_key<'a>(exercises: &'a [Exercise], key: &str) -> Option<&'a Exercise> {
    exercises.iter().find(|e| e.key() == key)
}

fn sorted_subdirs(dir: &Path) -> Result<Vec<PathBuf>, GitGymError> {
    let mut subdirs: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    subdirs.sort();
    Ok(subdirs)
}

/// Human topic name: `topic.toml` if present, else the directory name with
/// any `NN_` prefix stripped and the first letter capitalized.
fn topic_name(topic_dir: &Path) -> String {
    let meta_path = topic_dir.join("topic.toml");
    if let Ok(content) = fs::read_to_string(&meta_path) {
        if let Ok(meta) = toml::from_str::<TopicMeta>(&content) {
            return meta.name;
        }
    }

    let raw = topic_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stripped = raw
        .split_once('_')
        .filter(|(prefix, _)| prefix.chars().all(|c| c.is_ascii_digit()))
        .map(|(_, rest)| rest.to_string())
        .unwrap_or(raw);
    let mut chars = stripped.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => stripped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_exercise(dir: &Path, name: &str, title: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(
            dir.join("exercise.toml"),
            format!(
                r#"
name = "{name}"
title = "{title}"
description = "A description."
goal_summary = "A goal."
hints = ["First hint.", "Second hint."]
"#
            ),
        )
        .unwrap();
    }

    #[test]
    fn test_load_all_exercises_missing_library_is_empty() {
        let temp = tempfile::tempdir().unwrap();
        let exercises = load_all_exercises(&temp.path().join("nope")).unwrap();
        assert!(exercises.is_empty());
    }

    #[test]
    fn test_load_all_exercises_orders_by_directory() {
        let temp = tempfile::tempdir().unwrap();
        write_exercise(&temp.path().join("02_branches/01_create"), "create_branch", "Create");
        write_exercise(&temp.path().join("01_basics/02_staging"), "staging", "Stage");
        write_exercise(&temp.path().join("01_basics/01_init"), "init", "Init");

        let exercises = load_all_exercises(temp.path()).unwrap();
        let keys: Vec<String> = exercises.iter().map(|e| e.key()).collect();
        assert_eq!(
            keys,
            vec!["01_basics/01_init", "01_basics/02_staging", "02_branches/01_create"]
        );
    }

    #[test]
    fn test_exercise_fields_from_toml() {
        let temp = tempfile::tempdir().unwrap();
        write_exercise(&temp.path().join("01_basics/01_init"), "init", "Initialize a Repository");

        let exercises = load_all_exercises(temp.path()).unwrap();
        assert_eq!(exercises.len(), 1);
        let ex = &exercises[0];
        assert_eq!(ex.name, "init");
        assert_eq!(ex.title, "Initialize a Repository");
        assert_eq!(ex.goal_summary, "A goal.");
        assert_eq!(ex.hints.len(), 2);
    }

    #[test]
    fn test_topic_name_from_topic_toml() {
        let temp = tempfile::tempdir().unwrap();
        let topic_dir = temp.path().join("01_basics");
        write_exercise(&topic_dir.join("01_init"), "init", "Init");
        fs::write(topic_dir.join("topic.toml"), "name = \"Git Basics\"\n").unwrap();

        let exercises = load_all_exercises(temp.path()).unwrap();
        assert_eq!(exercises[0].topic, "Git Basics");
    }

    #[test]
    fn test_topic_name_fallback_prettifies_directory() {
        let temp = tempfile::tempdir().unwrap();
        write_exercise(&temp.path().join("01_basics/01_init"), "init", "Init");

        let exercises = load_all_exercises(temp.path()).unwrap();
        assert_eq!(exercises[0].topic, "Basics");
    }

    #[test]
    fn test_directory_without_metadata_is_skipped() {
        let temp = tempfile::tempdir().unwrap();
        write_exercise(&temp.path().join("01_basics/01_init"), "init", "Init");
        fs::create_dir_all(temp.path().join("01_basics/02_empty")).unwrap();

        let exercises = load_all_exercises(temp.path()).unwrap();
        assert_eq!(exercises.len(), 1);
    }

    #[test]
    fn test_malformed_metadata_is_an_error() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("01_basics/01_init");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("exercise.toml"), "name = [not toml").unwrap();

        let result = load_all_exercises(temp.path());
        assert!(matches!(result, Err(GitGymError::MalformedExercise { .. })));
    }

    #[test]
    fn test_workspace_path_mirrors_library_layout() {
        let temp = tempfile::tempdir().unwrap();
        write_exercise(&temp.path().join("01_basics/01_init"), "init", "Init");
        let exercises = load_all_exercises(temp.path()).unwrap();

        let config = Config {
            library_dir: temp.path().to_path_buf(),
            workspace_dir: PathBuf::from("/ws"),
            progress_file: PathBuf::from("/ws/progress.json"),
        };
        assert_eq!(
            exercises[0].workspace_path(&config),
            PathBuf::from("/ws/01_basics/01_init")
        );
    }

    #[test]
    fn test_find_by_name_and_key() {
        let temp = tempfile::tempdir().unwrap();
        write_exercise(&temp.path().join("01_basics/01_init"), "init", "Init");
        write_exercise(&temp.path().join("01_basics/02_staging"), "staging", "Stage");
        let exercises = load_all_exercises(temp.path()).unwrap();

        assert_eq!(find_by_name(&exercises, "staging").unwrap().title, "Stage");
        assert!(find_by_name(&exercises, "missing").is_none());
        assert_eq!(
            find_by_key(&exercises, "01_basics/01_init").unwrap().name,
            "init"
        );
    }
}
