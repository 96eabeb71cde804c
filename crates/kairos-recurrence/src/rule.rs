//! Recurrence rules as stored inside task records.
//!
//! The persisted shape is `{ "type", "interval", "days"?, "until"? }` and must
//! stay stable: rules written by the planner's task form are read back as-is.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{RecurrenceError, RecurrenceResult};
use crate::serde_util;

/// Cadence unit of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceType {
    /// Every `interval` days.
    Daily,
    /// Every `interval` weeks, optionally on a set of weekdays.
    Weekly,
    /// Every `interval` calendar months on the anchor's day of month.
    Monthly,
    /// Every `interval` days. Kept apart from `Daily` so the form can label it.
    Custom,
    /// Any type string this build does not know.
    #[serde(other)]
    Unknown,
}

impl RecurrenceType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Custom => "custom",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for RecurrenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recurrence rule embedded in a task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    #[serde(rename = "type")]
    pub kind: RecurrenceType,
    /// "Every N units". Signed so malformed stored values still load.
    #[serde(default = "default_interval")]
    pub interval: i32,
    /// Weekday numbers, 0 = Sunday .. 6 = Saturday. Only read for weekly rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<Vec<u8>>,
    /// Last day (inclusive) on which an occurrence may fall.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_util::optional_date"
    )]
    pub until: Option<NaiveDate>,
}

const fn default_interval() -> i32 {
    1
}

impl RecurrenceRule {
    #[must_use]
    pub const fn new(kind: RecurrenceType, interval: i32) -> Self {
        Self {
            kind,
            interval,
            days: None,
            until: None,
        }
    }

    #[must_use]
    pub const fn daily(interval: i32) -> Self {
        Self::new(RecurrenceType::Daily, interval)
    }

    #[must_use]
    pub const fn weekly(interval: i32) -> Self {
        Self::new(RecurrenceType::Weekly, interval)
    }

    #[must_use]
    pub const fn monthly(interval: i32) -> Self {
        Self::new(RecurrenceType::Monthly, interval)
    }

    #[must_use]
    pub const fn custom(interval: i32) -> Self {
        Self::new(RecurrenceType::Custom, interval)
    }

    #[must_use]
    pub fn with_days(mut self, days: impl IntoIterator<Item = u8>) -> Self {
        self.days = Some(days.into_iter().collect());
        self
    }

    #[must_use]
    pub const fn with_until(mut self, until: NaiveDate) -> Self {
        self.until = Some(until);
        self
    }

    /// Returns the selected weekdays as a bitmask (bit 0 = Sunday).
    ///
    /// `None` means "no explicit selection": the rule is not weekly, or `days`
    /// is absent or empty, so a weekly rule falls back to the anchor's weekday.
    /// Out-of-range numbers are ignored.
    #[must_use]
    pub fn weekday_mask(&self) -> Option<WeekdayMask> {
        if self.kind != RecurrenceType::Weekly {
            return None;
        }
        let days = self.days.as_deref().filter(|days| !days.is_empty())?;
        Some(WeekdayMask::from_numbers(days))
    }

    /// ## Summary
    /// Checks the rule the way the task form does before saving it.
    ///
    /// The expansion never calls this; it stays total for malformed rules.
    ///
    /// ## Errors
    /// Returns `RecurrenceError::UnknownType` for unrecognized types,
    /// `RecurrenceError::InvalidInterval` when `interval < 1` and
    /// `RecurrenceError::InvalidWeekday` for weekday numbers above 6.
    pub fn validate(&self) -> RecurrenceResult<()> {
        if self.kind == RecurrenceType::Unknown {
            return Err(RecurrenceError::UnknownType);
        }
        if self.interval < 1 {
            return Err(RecurrenceError::InvalidInterval(self.interval));
        }
        if let Some(&bad) = self
            .days
            .iter()
            .flatten()
            .find(|&&day| day > WeekdayMask::SATURDAY)
        {
            return Err(RecurrenceError::InvalidWeekday(bad));
        }
        Ok(())
    }
}

/// Set of weekdays, bit `n` set for weekday number `n` (0 = Sunday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WeekdayMask(u8);

impl WeekdayMask {
    pub const SUNDAY: u8 = 0;
    pub const SATURDAY: u8 = 6;

    #[must_use]
    pub fn from_numbers(days: &[u8]) -> Self {
        Self(
            days.iter()
                .filter(|&&day| day <= Self::SATURDAY)
                .fold(0, |mask, &day| mask | (1 << day)),
        )
    }

    #[must_use]
    pub const fn contains_number(self, day: u8) -> bool {
        day <= Self::SATURDAY && self.0 & (1 << day) != 0
    }

    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        self.contains_number(weekday_number(date))
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Selected weekday numbers, Sunday first.
    pub fn numbers(self) -> impl Iterator<Item = u8> {
        (Self::SUNDAY..=Self::SATURDAY).filter(move |&day| self.contains_number(day))
    }
}

/// Weekday number of `date` with 0 = Sunday.
#[must_use]
pub fn weekday_number(date: NaiveDate) -> u8 {
    // num_days_from_sunday is always 0..=6
    u8::try_from(date.weekday().num_days_from_sunday()).unwrap_or(WeekdayMask::SUNDAY)
}
