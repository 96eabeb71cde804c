//! Expansion of a recurring task into concrete occurrence dates.
//!
//! Every expansion is bounded twice: it never looks past `from + horizon_days`
//! and never examines more than `max_iterations` candidate dates. Together
//! these guarantee termination for any stored rule, including intervals of
//! zero or below.

use chrono::{Datelike, Days, Local, Months, NaiveDate};

use crate::engine::{EngineLimits, RecurrenceEngine};
use crate::pattern::matches_recurrence_pattern;
use crate::rule::{RecurrenceRule, RecurrenceType, WeekdayMask, weekday_number};
use crate::task::Task;

/// ## Summary
/// Expands a recurring task into its occurrence dates within `[from, to]`.
///
/// Returns an empty list when the task is not recurring, has no rule or has
/// no `scheduled_at` anchor. Dates are in ascending order.
#[must_use]
pub fn generate_occurrences(task: &Task, from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
    RecurrenceEngine::default().generate_occurrences(task, from, to)
}

/// ## Summary
/// Returns the first occurrence on or after `today`, looking one horizon ahead.
#[must_use]
pub fn next_occurrence_from(task: &Task, today: NaiveDate) -> Option<NaiveDate> {
    RecurrenceEngine::default().next_occurrence_from(task, today)
}

/// ## Summary
/// Returns the task's next due date, counting from today's local date.
#[must_use]
pub fn get_next_occurrence(task: &Task) -> Option<NaiveDate> {
    next_occurrence_from(task, Local::now().date_naive())
}

pub(crate) fn expand(
    task: &Task,
    from: NaiveDate,
    to: NaiveDate,
    limits: EngineLimits,
) -> Vec<NaiveDate> {
    let Some((rule, anchor)) = task.recurrence_anchor() else {
        tracing::trace!(task_id = %task.id, "Task has no active recurrence or anchor");
        return Vec::new();
    };

    let Some(window) = Window::new(rule, anchor, from, to, limits) else {
        tracing::trace!(task_id = %task.id, %from, %to, "Recurrence window is empty");
        return Vec::new();
    };

    tracing::trace!(
        task_id = %task.id,
        kind = %rule.kind,
        interval = rule.interval,
        %anchor,
        start = %window.start,
        end = %window.end,
        "Expanding recurrence"
    );

    if rule.kind == RecurrenceType::Unknown {
        tracing::warn!(task_id = %task.id, "Unrecognized recurrence type, nothing to expand");
        return Vec::new();
    }

    // interval < 1: the cursor cannot advance past its first position
    let Some(interval) = u32::try_from(rule.interval).ok().filter(|&n| n > 0) else {
        tracing::warn!(
            task_id = %task.id,
            interval = rule.interval,
            "Non-positive interval, examining the first candidate only"
        );
        return window.stalled(rule);
    };

    let occurrences = match rule.kind {
        RecurrenceType::Daily | RecurrenceType::Custom => {
            window.every_n_days(anchor, u64::from(interval))
        }
        RecurrenceType::Weekly => match rule.weekday_mask() {
            Some(mask) => window.weekly_on(anchor, mask, u64::from(interval)),
            None => window.every_n_days(anchor, 7 * u64::from(interval)),
        },
        RecurrenceType::Monthly => window.every_n_months(anchor, interval),
        RecurrenceType::Unknown => Vec::new(),
    };

    tracing::trace!(task_id = %task.id, count = occurrences.len(), "Expanded recurrence");
    occurrences
}

/// Requested range plus the bounds that clip it.
struct Window {
    from: NaiveDate,
    to: NaiveDate,
    /// `max(anchor, from)`
    start: NaiveDate,
    /// `min(until, to, from + horizon)`
    end: NaiveDate,
    max_iterations: u32,
}

impl Window {
    fn new(
        rule: &RecurrenceRule,
        anchor: NaiveDate,
        from: NaiveDate,
        to: NaiveDate,
        limits: EngineLimits,
    ) -> Option<Self> {
        let horizon = from
            .checked_add_days(Days::new(u64::from(limits.horizon_days)))
            .unwrap_or(NaiveDate::MAX);
        let end = rule.until.map_or(to, |until| until.min(to)).min(horizon);
        let start = anchor.max(from);

        (start <= end).then_some(Self {
            from,
            to,
            start,
            end,
            max_iterations: limits.max_iterations,
        })
    }

    fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    /// Steps from `first` with `advance` until past `end` or out of iterations,
    /// keeping the dates accepted by `emits`.
    fn walk(
        &self,
        first: Option<NaiveDate>,
        mut advance: impl FnMut(NaiveDate) -> Option<NaiveDate>,
        emits: impl Fn(NaiveDate) -> bool,
    ) -> Vec<NaiveDate> {
        let mut occurrences = Vec::new();
        let mut cursor = first;
        let mut iterations = 0;

        while let Some(date) = cursor.filter(|&date| date <= self.end) {
            if iterations >= self.max_iterations {
                tracing::debug!(
                    max_iterations = self.max_iterations,
                    %date,
                    "Iteration cap reached, truncating expansion"
                );
                break;
            }
            iterations += 1;

            if self.contains(date) && emits(date) {
                occurrences.push(date);
            }
            cursor = advance(date);
        }

        occurrences
    }

    fn stalled(&self, rule: &RecurrenceRule) -> Vec<NaiveDate> {
        self.walk(Some(self.start), |_| None, |date| {
            matches_recurrence_pattern(date, rule)
        })
    }

    /// Dates `anchor + k * step` days.
    fn every_n_days(&self, anchor: NaiveDate, step: u64) -> Vec<NaiveDate> {
        let offset = u64::try_from((self.start - anchor).num_days()).unwrap_or(0);
        let first = offset
            .div_ceil(step)
            .checked_mul(step)
            .and_then(|days| anchor.checked_add_days(Days::new(days)));

        self.walk(first, |date| date.checked_add_days(Days::new(step)), |_| true)
    }

    /// Selected weekdays of every `interval`-th Sunday..Saturday week, counted
    /// from the week that contains the anchor.
    fn weekly_on(&self, anchor: NaiveDate, mask: WeekdayMask, interval: u64) -> Vec<NaiveDate> {
        let start_week = week_start(self.start);
        let weeks_since =
            u64::try_from((start_week - week_start(anchor)).num_weeks()).unwrap_or(0);
        let idle_weeks = (interval - weeks_since % interval) % interval;

        let first = if idle_weeks == 0 {
            Some(self.start)
        } else {
            start_week.checked_add_days(Days::new(idle_weeks * 7))
        };
        let idle_days = (interval - 1) * 7;

        self.walk(
            first,
            |date| {
                let step = if weekday_number(date) == WeekdayMask::SATURDAY {
                    idle_days.checked_add(1)?
                } else {
                    1
                };
                date.checked_add_days(Days::new(step))
            },
            |date| mask.contains(date),
        )
    }

    /// Dates `anchor + k * interval` months, clamped to the last day of
    /// shorter months. Each step is taken from the anchor so clamping never
    /// drifts later occurrences.
    fn every_n_months(&self, anchor: NaiveDate, interval: u32) -> Vec<NaiveDate> {
        let nth = move |k: u32| {
            k.checked_mul(interval)
                .and_then(|months| anchor.checked_add_months(Months::new(months)))
        };

        let months_since = u32::try_from(month_index(self.start) - month_index(anchor)).unwrap_or(0);
        let mut k = months_since / interval;
        let mut first = nth(k);
        while first.is_some_and(|date| date < self.start) {
            k = k.saturating_add(1);
            first = nth(k);
        }

        self.walk(
            first,
            move |_| {
                k = k.checked_add(1)?;
                nth(k)
            },
            |_| true,
        )
    }
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date.checked_sub_days(Days::new(u64::from(weekday_number(date))))
        .unwrap_or(date)
}

fn month_index(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}
