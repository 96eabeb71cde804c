use anyhow::{Result, bail};
use chrono::{Days, NaiveDate};
use kairos_core::config::Settings;
use kairos_core::types::{Locale, TaskId};
use kairos_recurrence::{RecurrenceEngine, Task, format_recurrence, materialize_instances};
use serde::Serialize;

use crate::cli::{Command, WindowArgs};
use crate::input::load_tasks;
use crate::today::today;

/// Days after `--from` covered when `--to` is omitted.
const DEFAULT_WINDOW_DAYS: u64 = 6;

/// Everything a command needs besides its task file.
#[derive(Debug, Clone, Copy)]
pub struct RunContext {
    pub engine: RecurrenceEngine,
    pub locale: Locale,
    pub today: NaiveDate,
}

impl RunContext {
    /// ## Summary
    /// Builds the context from loaded settings.
    ///
    /// ## Errors
    /// Returns an error for unusable recurrence limits or an unknown time zone.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self {
            engine: RecurrenceEngine::from_settings(settings)?,
            locale: settings.display.locale,
            today: today(settings.display.timezone.as_deref())?,
        })
    }
}

/// ## Summary
/// Runs a subcommand and returns what it prints.
///
/// ## Errors
/// Returns an error if the task file cannot be loaded, the window is inverted,
/// or any task fails `validate`.
pub fn run(command: &Command, ctx: &RunContext) -> Result<String> {
    match command {
        Command::Expand(args) => {
            let (from, to) = window(args, ctx)?;
            expand(&load_tasks(&args.input.tasks)?, from, to, ctx)
        }
        Command::Next(args) => next(&load_tasks(&args.tasks)?, ctx),
        Command::Describe(args) => Ok(describe(
            &load_tasks(&args.input.tasks)?,
            args.locale.unwrap_or(ctx.locale),
        )),
        Command::Materialize(args) => {
            let (from, to) = window(args, ctx)?;
            materialize(&load_tasks(&args.input.tasks)?, from, to, ctx)
        }
        Command::Agenda(args) => {
            let (from, to) = window(args, ctx)?;
            agenda(&load_tasks(&args.input.tasks)?, from, to, ctx)
        }
        Command::Validate(args) => validate(&load_tasks(&args.tasks)?),
    }
}

fn window(args: &WindowArgs, ctx: &RunContext) -> Result<(NaiveDate, NaiveDate)> {
    let from = args.from.unwrap_or(ctx.today);
    let to = match args.to {
        Some(to) => to,
        None => from
            .checked_add_days(Days::new(DEFAULT_WINDOW_DAYS))
            .unwrap_or(NaiveDate::MAX),
    };
    if to < from {
        bail!("--to {to} is before --from {from}");
    }
    Ok((from, to))
}

#[derive(Serialize)]
struct Expansion<'a> {
    task_id: TaskId,
    title: &'a str,
    occurrences: Vec<NaiveDate>,
}

#[derive(Serialize)]
struct NextDue<'a> {
    task_id: TaskId,
    title: &'a str,
    next: Option<NaiveDate>,
}

/// Occurrences of each recurring task in the window, as JSON.
///
/// ## Errors
/// Returns an error if serialization fails.
pub fn expand(tasks: &[Task], from: NaiveDate, to: NaiveDate, ctx: &RunContext) -> Result<String> {
    let expansions: Vec<Expansion<'_>> = tasks
        .iter()
        .filter(|task| task.active_recurrence().is_some())
        .map(|task| Expansion {
            task_id: task.id,
            title: &task.title,
            occurrences: ctx.engine.generate_occurrences(task, from, to),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&expansions)?)
}

/// Next due date of each recurring task counting from today, as JSON.
///
/// ## Errors
/// Returns an error if serialization fails.
pub fn next(tasks: &[Task], ctx: &RunContext) -> Result<String> {
    let due: Vec<NextDue<'_>> = tasks
        .iter()
        .filter(|task| task.active_recurrence().is_some())
        .map(|task| NextDue {
            task_id: task.id,
            title: &task.title,
            next: ctx.engine.next_occurrence_from(task, ctx.today),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&due)?)
}

/// One `title: description` line per task.
#[must_use]
pub fn describe(tasks: &[Task], locale: Locale) -> String {
    tasks
        .iter()
        .map(|task| {
            format!(
                "{}: {}",
                task.title,
                format_recurrence(task.active_recurrence(), locale)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Insert payloads for every occurrence of every recurring task, as JSON.
///
/// ## Errors
/// Returns an error if serialization fails.
pub fn materialize(
    tasks: &[Task],
    from: NaiveDate,
    to: NaiveDate,
    ctx: &RunContext,
) -> Result<String> {
    let instances: Vec<_> = tasks
        .iter()
        .flat_map(|task| {
            let dates = ctx.engine.generate_occurrences(task, from, to);
            materialize_instances(task, &dates)
        })
        .collect();
    Ok(serde_json::to_string_pretty(&instances)?)
}

/// Day-by-day agenda of the window, as JSON.
///
/// ## Errors
/// Returns an error if serialization fails.
pub fn agenda(tasks: &[Task], from: NaiveDate, to: NaiveDate, ctx: &RunContext) -> Result<String> {
    Ok(serde_json::to_string_pretty(&ctx.engine.agenda(tasks, from, to))?)
}

/// ## Summary
/// Checks every task's recurrence settings.
///
/// ## Errors
/// Returns the full report as an error when any task fails.
pub fn validate(tasks: &[Task]) -> Result<String> {
    let mut failed = 0_usize;
    let lines: Vec<String> = tasks
        .iter()
        .map(|task| match task.validate_recurrence() {
            Ok(()) => format!("{} ({}): ok", task.id, task.title),
            Err(e) => {
                failed += 1;
                tracing::warn!(task_id = %task.id, error = %e, "Invalid recurrence");
                format!("{} ({}): {e}", task.id, task.title)
            }
        })
        .collect();
    let report = lines.join("\n");

    if failed > 0 {
        bail!("{report}\n{failed} of {} tasks failed validation", tasks.len());
    }
    Ok(report)
}
