use chrono::NaiveDate;
use thiserror::Error;

/// Rule authoring and engine configuration errors.
///
/// Expansion itself never fails; these surface only from explicit validation.
#[derive(Error, Debug)]
pub enum RecurrenceError {
    #[error("Interval must be at least 1, got {0}")]
    InvalidInterval(i32),

    #[error("Weekday must be between 0 (Sunday) and 6 (Saturday), got {0}")]
    InvalidWeekday(u8),

    #[error("Unrecognized recurrence type")]
    UnknownType,

    #[error("Recurring task has no scheduled date to anchor on")]
    MissingAnchor,

    #[error("Recurrence ends on {until}, before its first occurrence on {anchor}")]
    UntilBeforeAnchor { until: NaiveDate, anchor: NaiveDate },

    #[error(transparent)]
    CoreError(#[from] kairos_core::error::CoreError),
}

pub type RecurrenceResult<T> = std::result::Result<T, RecurrenceError>;
