//! Stateless service object around the expansion.

use std::collections::BTreeMap;

use chrono::{Days, Local, NaiveDate};
use kairos_core::config::{RecurrenceConfig, Settings};
use kairos_core::constants::{DEFAULT_HORIZON_DAYS, DEFAULT_MAX_ITERATIONS};
use kairos_core::error::CoreError;
use kairos_core::types::TaskId;

use crate::error::RecurrenceResult;
use crate::expand::expand;
use crate::task::Task;

/// Tasks due on each day of a window, in input order within a day.
pub type Agenda = BTreeMap<NaiveDate, Vec<TaskId>>;

/// Safety bounds for a single expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineLimits {
    /// Days after the window start beyond which nothing is generated.
    pub horizon_days: u32,
    /// Candidate dates examined before giving up.
    pub max_iterations: u32,
}

impl Default for EngineLimits {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl EngineLimits {
    /// ## Summary
    /// Builds limits from the `[recurrence]` configuration section.
    ///
    /// ## Errors
    /// Returns a configuration error when either bound is zero.
    pub fn from_config(config: &RecurrenceConfig) -> RecurrenceResult<Self> {
        if config.horizon_days == 0 || config.max_iterations == 0 {
            return Err(CoreError::ConfigError(format!(
                "recurrence limits must be positive (horizon_days={}, max_iterations={})",
                config.horizon_days, config.max_iterations
            ))
            .into());
        }
        Ok(Self {
            horizon_days: config.horizon_days,
            max_iterations: config.max_iterations,
        })
    }
}

/// Recurrence operations bound to a set of [`EngineLimits`].
///
/// Holds no state besides its limits, so it is `Copy` and safe to share.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecurrenceEngine {
    limits: EngineLimits,
}

impl RecurrenceEngine {
    #[must_use]
    pub const fn new(limits: EngineLimits) -> Self {
        Self { limits }
    }

    /// ## Summary
    /// Creates an engine from loaded settings.
    ///
    /// ## Errors
    /// Returns a configuration error when the configured limits are unusable.
    pub fn from_settings(settings: &Settings) -> RecurrenceResult<Self> {
        EngineLimits::from_config(&settings.recurrence).map(Self::new)
    }

    #[must_use]
    pub const fn limits(&self) -> EngineLimits {
        self.limits
    }

    /// See [`crate::generate_occurrences`].
    #[must_use]
    pub fn generate_occurrences(&self, task: &Task, from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
        expand(task, from, to, self.limits)
    }

    /// First occurrence within one horizon of `today`.
    #[must_use]
    pub fn next_occurrence_from(&self, task: &Task, today: NaiveDate) -> Option<NaiveDate> {
        let horizon = today
            .checked_add_days(Days::new(u64::from(self.limits.horizon_days)))
            .unwrap_or(NaiveDate::MAX);
        expand(task, today, horizon, self.limits).into_iter().next()
    }

    /// First occurrence counting from the system's local date.
    #[must_use]
    pub fn next_occurrence(&self, task: &Task) -> Option<NaiveDate> {
        self.next_occurrence_from(task, Local::now().date_naive())
    }

    /// ## Summary
    /// Exact membership test: is `date` one of the task's occurrences?
    ///
    /// Unlike [`crate::matches_recurrence_pattern`] this honours the interval,
    /// the anchor and `until`.
    #[must_use]
    pub fn occurs_on(&self, task: &Task, date: NaiveDate) -> bool {
        expand(task, date, date, self.limits).contains(&date)
    }

    /// ## Summary
    /// Groups the tasks due in `[from, to]` by day.
    ///
    /// Recurring tasks contribute every occurrence; other tasks appear on the
    /// date of their `scheduled_at` when it falls inside the window.
    #[must_use]
    pub fn agenda<'a>(
        &self,
        tasks: impl IntoIterator<Item = &'a Task>,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Agenda {
        let mut agenda = Agenda::new();

        for task in tasks {
            let dates = if task.active_recurrence().is_some() {
                self.generate_occurrences(task, from, to)
            } else {
                task.scheduled_at
                    .map(|at| at.date())
                    .filter(|date| from <= *date && *date <= to)
                    .into_iter()
                    .collect()
            };
            for date in dates {
                agenda.entry(date).or_default().push(task.id);
            }
        }

        tracing::debug!(%from, %to, days = agenda.len(), "Built agenda");
        agenda
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::RecurrenceRule;
    use kairos_core::types::UserId;

    fn date(value: &str) -> NaiveDate {
        crate::serde_util::parse_calendar_date(value).unwrap()
    }

    fn task_at(title: &str, at: &str) -> Task {
        let at = crate::serde_util::parse_local_datetime(at).unwrap();
        Task::new(UserId::new("u1"), title).scheduled(at)
    }

    #[test]
    fn test_limits_from_config() {
        let limits = EngineLimits::from_config(&RecurrenceConfig {
            horizon_days: 30,
            max_iterations: 50,
        })
        .unwrap();
        assert_eq!(limits.horizon_days, 30);
        assert_eq!(limits.max_iterations, 50);

        assert!(
            EngineLimits::from_config(&RecurrenceConfig {
                horizon_days: 0,
                max_iterations: 50,
            })
            .is_err()
        );
    }

    #[test]
    fn test_from_settings_uses_defaults() {
        let engine = RecurrenceEngine::from_settings(&Settings::default()).unwrap();
        assert_eq!(engine.limits(), EngineLimits::default());
        assert_eq!(engine, RecurrenceEngine::default());
    }

    #[test]
    fn test_shorter_horizon_clips_expansion() {
        let task = task_at("Water plants", "2025-01-01T08:00:00").recurring(RecurrenceRule::daily(1));
        let engine = RecurrenceEngine::new(EngineLimits {
            horizon_days: 6,
            ..EngineLimits::default()
        });
        let occurrences = engine.generate_occurrences(&task, date("2025-01-01"), date("2025-01-31"));
        assert_eq!(occurrences.len(), 7);
        assert_eq!(occurrences.last(), Some(&date("2025-01-07")));
    }

    #[test]
    fn test_occurs_on_honours_cadence() {
        let engine = RecurrenceEngine::default();
        let task = task_at("Laundry", "2025-01-01T19:00:00").recurring(RecurrenceRule::daily(3));

        assert!(engine.occurs_on(&task, date("2025-01-01")));
        assert!(engine.occurs_on(&task, date("2025-01-04")));
        assert!(!engine.occurs_on(&task, date("2025-01-05")));
        assert!(!engine.occurs_on(&task, date("2024-12-29")));

        let monthly = task_at("Rent", "2025-01-31T09:00:00").recurring(RecurrenceRule::monthly(1));
        assert!(engine.occurs_on(&monthly, date("2025-02-28")));
        assert!(!engine.occurs_on(&monthly, date("2025-02-27")));
    }

    #[test]
    fn test_agenda_groups_by_day() {
        let engine = RecurrenceEngine::default();
        let standup = task_at("Standup", "2025-01-06T09:30:00")
            .recurring(RecurrenceRule::weekly(1).with_days([1, 3, 5]));
        let dentist = task_at("Dentist", "2025-01-08T15:00:00");
        let outside = task_at("Holiday", "2025-03-01T00:00:00");
        let backlog = Task::new(UserId::new("u1"), "Someday");

        let agenda = engine.agenda(
            [&standup, &dentist, &outside, &backlog],
            date("2025-01-06"),
            date("2025-01-12"),
        );

        assert_eq!(
            agenda.keys().copied().collect::<Vec<_>>(),
            vec![date("2025-01-06"), date("2025-01-08"), date("2025-01-10")]
        );
        assert_eq!(agenda[&date("2025-01-08")], vec![standup.id, dentist.id]);
        assert_eq!(agenda[&date("2025-01-10")], vec![standup.id]);
    }
}
