//! Weekday-level pattern test for a single date.

use chrono::NaiveDate;

use crate::rule::{RecurrenceRule, RecurrenceType};

/// ## Summary
/// Tests whether `date` fits the rule's weekday pattern.
///
/// Daily, custom and monthly rules accept every date; weekly rules accept any
/// date when no weekdays are selected, otherwise only the selected weekdays.
/// Cadence (interval and anchor) is not checked here: callers that need the
/// exact answer should use [`RecurrenceEngine::occurs_on`].
///
/// [`RecurrenceEngine::occurs_on`]: crate::engine::RecurrenceEngine::occurs_on
#[must_use]
pub fn matches_recurrence_pattern(date: NaiveDate, rule: &RecurrenceRule) -> bool {
    match rule.kind {
        RecurrenceType::Daily | RecurrenceType::Monthly | RecurrenceType::Custom => true,
        RecurrenceType::Weekly => rule.weekday_mask().is_none_or(|mask| mask.contains(date)),
        RecurrenceType::Unknown => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_non_weekly_rules_accept_any_date() {
        // 2025-01-04 is a Saturday
        let saturday = date(2025, 1, 4);
        for rule in [
            RecurrenceRule::daily(3),
            RecurrenceRule::monthly(2),
            RecurrenceRule::custom(10),
            RecurrenceRule::daily(1).with_days([1]),
        ] {
            assert!(matches_recurrence_pattern(saturday, &rule), "{rule:?}");
        }
    }

    #[test]
    fn test_weekly_checks_membership() {
        let rule = RecurrenceRule::weekly(2).with_days([1, 3]);
        assert!(matches_recurrence_pattern(date(2025, 1, 6), &rule));
        assert!(matches_recurrence_pattern(date(2025, 1, 8), &rule));
        assert!(!matches_recurrence_pattern(date(2025, 1, 7), &rule));

        let any_day = RecurrenceRule::weekly(1);
        assert!(matches_recurrence_pattern(date(2025, 1, 7), &any_day));
        assert!(matches_recurrence_pattern(
            date(2025, 1, 7),
            &RecurrenceRule::weekly(1).with_days([])
        ));
    }

    #[test]
    fn test_unknown_type_never_matches() {
        let rule = RecurrenceRule::new(RecurrenceType::Unknown, 1);
        assert!(!matches_recurrence_pattern(date(2025, 1, 6), &rule));
    }
}
