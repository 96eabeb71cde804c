//! Recurrence engine for the Kairos task planner.
//!
//! A recurring task stores a [`RecurrenceRule`] next to its `scheduled_at`
//! anchor. This crate expands that rule into calendar dates, answers "what is
//! next", describes the rule for display and turns occurrences into standalone
//! task records. Everything here is pure: no I/O and no shared state.

pub mod engine;
pub mod error;
pub mod expand;
pub mod export;
pub mod format;
pub mod materialize;
pub mod pattern;
pub mod rule;
pub mod serde_util;
pub mod task;

pub use engine::{Agenda, EngineLimits, RecurrenceEngine};
pub use error::{RecurrenceError, RecurrenceResult};
pub use expand::{generate_occurrences, get_next_occurrence, next_occurrence_from};
pub use format::format_recurrence;
pub use materialize::materialize_instances;
pub use pattern::matches_recurrence_pattern;
pub use rule::{RecurrenceRule, RecurrenceType, WeekdayMask};
pub use task::{NewTask, Task};
