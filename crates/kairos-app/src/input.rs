use std::path::Path;

use anyhow::{Context, Result};
use kairos_recurrence::Task;
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<Task>),
    One(Box<Task>),
}

/// ## Summary
/// Parses task records from JSON holding either one record or an array.
///
/// ## Errors
/// Returns an error if the document is not a task record or an array of them.
pub fn parse_tasks(json: &str) -> Result<Vec<Task>> {
    let parsed: OneOrMany =
        serde_json::from_str(json).context("expected a task record or an array of task records")?;
    Ok(match parsed {
        OneOrMany::Many(tasks) => tasks,
        OneOrMany::One(task) => vec![*task],
    })
}

/// ## Summary
/// Reads and parses a task file.
///
/// ## Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load_tasks(path: &Path) -> Result<Vec<Task>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let tasks = parse_tasks(&json).with_context(|| format!("failed to parse {}", path.display()))?;
    tracing::debug!(path = %path.display(), count = tasks.len(), "Loaded tasks");
    Ok(tasks)
}
