//! Terminal output helpers
//!
//! Semantic coloring: green for success, yellow for warnings and goals, red
//! for errors, cyan for informational paths.

use gitgym_core::{Exercise, ProgressDocument, Status};
use owo_colors::OwoColorize;

pub fn print_success(message: &str) {
    println!("{}", message.green());
}

pub fn print_error(message: &str) {
    eprintln!("{}", message.red());
}

pub fn print_info(message: &str) {
    println!("{}", message.cyan());
}

pub fn print_warning(message: &str) {
    eprintln!("{}", message.yellow());
}

/// Formatted header for one exercise: topic, title, description, goal
pub fn print_exercise_header(exercise: &Exercise) {
    println!("{}", format!("── {} ──", exercise.topic).yellow());
    println!("{}", exercise.title.bold());
    println!("\n{}\n", exercise.description.trim());
    println!("{}", format!("Goal: {}", exercise.goal_summary).yellow());
}

/// One-character status marker: ✓ completed, → in progress, ○ not started
fn status_indicator(status: Status) -> String {
    match status {
        Status::Completed => "✓".green().to_string(),
        Status::InProgress => "→".yellow().to_string(),
        Status::NotStarted => "○".dimmed().to_string(),
    }
}

fn status_of(doc: &ProgressDocument, key: &str) -> Status {
    doc.exercises.get(key).map(|r| r.status).unwrap_or_default()
}

/// Exercises grouped by topic with status indicators
pub fn print_exercise_list(exercises: &[Exercise], doc: &ProgressDocument) {
    if exercises.is_empty() {
        println!("No exercises found");
        return;
    }

    let mut current_topic: Option<&str> = None;
    for exercise in exercises {
        if current_topic != Some(exercise.topic.as_str()) {
            if current_topic.is_some() {
                println!();
            }
            println!("{}", exercise.topic.yellow().bold());
            current_topic = Some(exercise.topic.as_str());
        }
        println!(
            "  {} {:<16} {}",
            status_indicator(status_of(doc, &exercise.key())),
            exercise.name,
            exercise.title
        );
    }
}

/// Per-topic and overall completion counts
pub fn print_progress_summary(exercises: &[Exercise], doc: &ProgressDocument) {
    if exercises.is_empty() {
        println!("No exercises found");
        return;
    }

    let mut completed_total = 0;
    let mut current_topic: Option<&str> = None;
    let mut topic_done = 0;
    let mut topic_total = 0;

    fn flush(topic: Option<&str>, done: usize, total: usize) {
        if let Some(topic) = topic {
            println!("  {:<24} {}/{}", topic, done, total);
        }
    }

    for exercise in exercises {
        if current_topic != Some(exercise.topic.as_str()) {
            flush(current_topic, topic_done, topic_total);
            current_topic = Some(exercise.topic.as_str());
            topic_done = 0;
            topic_total = 0;
        }
        topic_total += 1;
        if status_of(doc, &exercise.key()) == Status::Completed {
            topic_done += 1;
            completed_total += 1;
        }
    }
    flush(current_topic, topic_done, topic_total);

    println!();
    let line = format!("Completed {}/{} exercises", completed_total, exercises.len());
    if completed_total == exercises.len() {
        println!("{}", line.green().bold());
    } else {
        println!("{}", line.bold());
    }
}
