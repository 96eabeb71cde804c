//! Task records as the planner stores them.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use kairos_core::types::{TaskId, TaskStatus, TaskWeight, UserId};
use serde::{Deserialize, Serialize};

use crate::error::{RecurrenceError, RecurrenceResult};
use crate::rule::RecurrenceRule;
use crate::serde_util;

/// A persisted task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub user_id: UserId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub weight: TaskWeight,
    #[serde(default)]
    pub status: TaskStatus,
    /// Calendar slot in local wall-clock time; the recurrence anchor.
    #[serde(default, with = "serde_util::optional_local_datetime")]
    pub scheduled_at: Option<NaiveDateTime>,
    #[serde(default, with = "serde_util::optional_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub recurrence: Option<RecurrenceRule>,
    /// Set on materialized instances; points at the recurring template.
    #[serde(default)]
    pub parent_id: Option<TaskId>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates an unscheduled backlog task with a fresh id.
    #[must_use]
    pub fn new(user_id: UserId, title: impl Into<String>) -> Self {
        Self {
            id: TaskId::new(),
            user_id,
            title: title.into(),
            description: None,
            weight: TaskWeight::default(),
            status: TaskStatus::Backlog,
            scheduled_at: None,
            due_date: None,
            completed_at: None,
            is_recurring: false,
            recurrence: None,
            parent_id: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Places the task on the calendar.
    #[must_use]
    pub fn scheduled(mut self, at: NaiveDateTime) -> Self {
        self.scheduled_at = Some(at);
        self.status = TaskStatus::Scheduled;
        self
    }

    /// Turns the task into a recurring template.
    #[must_use]
    pub fn recurring(mut self, rule: RecurrenceRule) -> Self {
        self.is_recurring = true;
        self.recurrence = Some(rule);
        self
    }

    /// The rule that is in effect, honouring the `is_recurring` gate.
    #[must_use]
    pub fn active_recurrence(&self) -> Option<&RecurrenceRule> {
        self.recurrence.as_ref().filter(|_| self.is_recurring)
    }

    /// Active rule together with the anchor date, when the task can be expanded.
    #[must_use]
    pub fn recurrence_anchor(&self) -> Option<(&RecurrenceRule, NaiveDate)> {
        let rule = self.active_recurrence()?;
        let anchor = self.scheduled_at?.date();
        Some((rule, anchor))
    }

    /// ## Summary
    /// Validates the recurrence settings before the task is saved.
    ///
    /// Non-recurring tasks always pass, whatever stale rule they carry.
    ///
    /// ## Errors
    /// Returns the rule's validation error, `RecurrenceError::MissingAnchor` when
    /// the task has no `scheduled_at`, or `RecurrenceError::UntilBeforeAnchor`.
    pub fn validate_recurrence(&self) -> RecurrenceResult<()> {
        let Some(rule) = self.active_recurrence() else {
            return Ok(());
        };
        rule.validate()?;

        let anchor = self
            .scheduled_at
            .map(|at| at.date())
            .ok_or(RecurrenceError::MissingAnchor)?;
        if let Some(until) = rule.until.filter(|&until| until < anchor) {
            return Err(RecurrenceError::UntilBeforeAnchor { until, anchor });
        }
        Ok(())
    }
}

/// Insert payload: a task without the fields the record store assigns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub user_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub weight: TaskWeight,
    pub status: TaskStatus,
    #[serde(with = "serde_util::optional_local_datetime")]
    pub scheduled_at: Option<NaiveDateTime>,
    #[serde(with = "serde_util::optional_date")]
    pub due_date: Option<NaiveDate>,
    pub completed_at: Option<DateTime<Utc>>,
    pub is_recurring: bool,
    pub recurrence: Option<RecurrenceRule>,
    pub parent_id: Option<TaskId>,
}
