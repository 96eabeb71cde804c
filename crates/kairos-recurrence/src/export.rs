//! RFC 5545 export of stored rules.
//!
//! Lets a recurring task be published to calendar clients. The wall-clock
//! anchor is written as UTC since the planner stores no zone.

use chrono::NaiveDateTime;

use crate::rule::{RecurrenceRule, RecurrenceType};

const RRULE_WEEKDAYS: [&str; 7] = ["SU", "MO", "TU", "WE", "TH", "FR", "SA"];

impl RecurrenceRule {
    /// ## Summary
    /// Renders the rule as `DTSTART` and `RRULE` content lines anchored at `anchor`.
    ///
    /// Weeks start on Sunday (`WKST=SU`) to match the planner's week model.
    /// Monthly rules differ from the planner at month ends: RFC 5545 skips
    /// months without the anchor's day where the planner clamps to the last day.
    ///
    /// Returns `None` for rules that cannot be expressed: unknown types and
    /// intervals below 1.
    #[must_use]
    pub fn to_rrule(&self, anchor: NaiveDateTime) -> Option<String> {
        if self.interval < 1 {
            return None;
        }
        let freq = match self.kind {
            RecurrenceType::Daily | RecurrenceType::Custom => "DAILY",
            RecurrenceType::Weekly => "WEEKLY",
            RecurrenceType::Monthly => "MONTHLY",
            RecurrenceType::Unknown => return None,
        };

        let mut rrule = format!("FREQ={freq};INTERVAL={}", self.interval);
        if let Some(mask) = self.weekday_mask().filter(|mask| !mask.is_empty()) {
            let by_day: Vec<&str> = mask
                .numbers()
                .map(|day| RRULE_WEEKDAYS[usize::from(day)])
                .collect();
            rrule.push_str(";BYDAY=");
            rrule.push_str(&by_day.join(","));
        }
        if self.kind == RecurrenceType::Weekly {
            rrule.push_str(";WKST=SU");
        }
        if let Some(until) = self.until {
            rrule.push_str(&format!(";UNTIL={}T235959Z", until.format("%Y%m%d")));
        }

        Some(format!(
            "DTSTART:{}\nRRULE:{rrule}",
            anchor.format("%Y%m%dT%H%M%SZ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serde_util::{parse_calendar_date, parse_local_datetime};

    fn anchor() -> NaiveDateTime {
        parse_local_datetime("2025-01-06T08:00:00").unwrap()
    }

    #[test]
    fn test_weekly_with_days_and_until() {
        let rule = RecurrenceRule::weekly(2)
            .with_days([5, 1])
            .with_until(parse_calendar_date("2025-03-01").unwrap());
        assert_eq!(
            rule.to_rrule(anchor()).as_deref(),
            Some(
                "DTSTART:20250106T080000Z\nRRULE:FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,FR;WKST=SU;UNTIL=20250301T235959Z"
            )
        );
    }

    #[test]
    fn test_custom_exports_as_daily() {
        assert_eq!(
            RecurrenceRule::custom(10).to_rrule(anchor()).as_deref(),
            Some("DTSTART:20250106T080000Z\nRRULE:FREQ=DAILY;INTERVAL=10")
        );
    }

    #[test]
    fn test_inexpressible_rules() {
        assert!(RecurrenceRule::daily(0).to_rrule(anchor()).is_none());
        assert!(
            RecurrenceRule::new(RecurrenceType::Unknown, 1)
                .to_rrule(anchor())
                .is_none()
        );
    }
}
