use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use kairos_core::types::Locale;

#[derive(Debug, Parser)]
#[command(name = "kairos", version, about = "Expand and inspect recurring planner tasks")]
pub struct Cli {
    /// TOML configuration file; `kairos.toml` in the working directory by default
    #[arg(long, global = true, env = "KAIROS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List occurrence dates of each recurring task
    Expand(WindowArgs),
    /// Show the next due date of each recurring task
    Next(InputArgs),
    /// Describe each task's recurrence in words
    Describe(DescribeArgs),
    /// Print insert payloads for every occurrence in the window
    Materialize(WindowArgs),
    /// Group all tasks due in the window by day
    Agenda(WindowArgs),
    /// Check recurrence settings the way the task form does
    Validate(InputArgs),
}

#[derive(Debug, Args)]
pub struct InputArgs {
    /// JSON file holding one task record or an array of them
    pub tasks: PathBuf,
}

#[derive(Debug, Args)]
pub struct WindowArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// First day of the window (defaults to today)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last day of the window, inclusive (defaults to six days after `--from`)
    #[arg(long)]
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Args)]
pub struct DescribeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Overrides `display.locale` (en, it)
    #[arg(long)]
    pub locale: Option<Locale>,
}
