//! Turning occurrence dates into standalone task records.

use chrono::{NaiveDate, NaiveTime};

use crate::task::{NewTask, Task};

/// ## Summary
/// Builds one insert payload per occurrence date, copied from `template`.
///
/// Each instance keeps the template's content and time of day, points back at
/// it through `parent_id` and is itself non-recurring. Identity and timestamps
/// are left for the record store to assign. No I/O happens here.
#[must_use]
pub fn materialize_instances(template: &Task, occurrences: &[NaiveDate]) -> Vec<NewTask> {
    let time_of_day = template
        .scheduled_at
        .map_or(NaiveTime::MIN, |at| at.time());

    tracing::debug!(
        task_id = %template.id,
        count = occurrences.len(),
        "Materializing recurrence instances"
    );

    occurrences
        .iter()
        .map(|date| NewTask {
            user_id: template.user_id.clone(),
            title: template.title.clone(),
            description: template.description.clone(),
            weight: template.weight,
            status: template.status,
            scheduled_at: Some(date.and_time(time_of_day)),
            due_date: template.due_date,
            completed_at: template.completed_at,
            is_recurring: false,
            recurrence: None,
            parent_id: Some(template.id),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expand::generate_occurrences;
    use crate::rule::RecurrenceRule;
    use crate::serde_util::{parse_calendar_date, parse_local_datetime};
    use kairos_core::types::{TaskId, TaskStatus, TaskWeight, UserId};

    fn template() -> Task {
        let mut task = Task::new(UserId::new("u1"), "Review budget")
            .scheduled(parse_local_datetime("2025-01-06T18:45:00").unwrap())
            .recurring(RecurrenceRule::weekly(1).with_days([1, 4]));
        task.description = Some("Monthly spreadsheet".to_string());
        task.weight = TaskWeight::new(4).unwrap();
        task.parent_id = Some(TaskId::new());
        task.created_at = Some(chrono::Utc::now());
        task.updated_at = Some(chrono::Utc::now());
        task
    }

    #[test]
    fn test_instances_strip_identity_and_recurrence() {
        let template = template();
        let dates = generate_occurrences(
            &template,
            parse_calendar_date("2025-01-06").unwrap(),
            parse_calendar_date("2025-01-12").unwrap(),
        );
        let instances = materialize_instances(&template, &dates);

        assert_eq!(instances.len(), 2);
        for instance in &instances {
            assert_eq!(instance.parent_id, Some(template.id));
            assert!(!instance.is_recurring);
            assert!(instance.recurrence.is_none());
            assert_eq!(instance.title, template.title);
            assert_eq!(instance.description, template.description);
            assert_eq!(instance.weight, template.weight);
            assert_eq!(instance.status, TaskStatus::Scheduled);
        }
        assert_eq!(
            instances[1].scheduled_at,
            parse_local_datetime("2025-01-09T18:45:00")
        );
    }

    #[test]
    fn test_serialized_payload_has_no_store_fields() {
        let template = template();
        let instances =
            materialize_instances(&template, &[parse_calendar_date("2025-01-06").unwrap()]);
        let value = serde_json::to_value(&instances[0]).unwrap();

        for field in ["id", "created_at", "updated_at"] {
            assert!(value.get(field).is_none(), "{field} must be left to the store");
        }
        assert_eq!(value["scheduled_at"], "2025-01-06T18:45:00");
        assert_eq!(value["is_recurring"], false);
        assert!(value["recurrence"].is_null());
    }

    #[test]
    fn test_no_dates_no_instances() {
        assert!(materialize_instances(&template(), &[]).is_empty());
    }
}
