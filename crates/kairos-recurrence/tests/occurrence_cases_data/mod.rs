use chrono::NaiveDate;

pub struct OccurrenceCase {
    pub name: &'static str,
    /// Rule as stored in the task record.
    pub rule: &'static str,
    /// The task's `scheduled_at`.
    pub anchor: &'static str,
    pub from: &'static str,
    pub to: &'static str,
    pub expected: &'static [&'static str],
}

#[expect(clippy::too_many_lines)]
pub fn occurrence_cases() -> Vec<OccurrenceCase> {
    vec![
        OccurrenceCase {
            name: "daily_basic",
            rule: r#"{"type":"daily","interval":1}"#,
            anchor: "2025-01-01T09:00:00",
            from: "2025-01-01",
            to: "2025-01-05",
            expected: &[
                "2025-01-01",
                "2025-01-02",
                "2025-01-03",
                "2025-01-04",
                "2025-01-05",
            ],
        },
        OccurrenceCase {
            name: "daily_every_third_keeps_anchor_cadence",
            rule: r#"{"type":"daily","interval":3}"#,
            anchor: "2025-01-01T09:00:00",
            from: "2025-01-05",
            to: "2025-01-15",
            expected: &["2025-01-07", "2025-01-10", "2025-01-13"],
        },
        OccurrenceCase {
            name: "custom_every_two_days",
            rule: r#"{"type":"custom","interval":2}"#,
            anchor: "2025-01-01T18:00:00",
            from: "2025-01-01",
            to: "2025-01-08",
            expected: &["2025-01-01", "2025-01-03", "2025-01-05", "2025-01-07"],
        },
        OccurrenceCase {
            name: "weekly_mon_wed_fri",
            rule: r#"{"type":"weekly","interval":1,"days":[1,3,5]}"#,
            anchor: "2025-01-06T08:00:00",
            from: "2025-01-06",
            to: "2025-01-19",
            expected: &[
                "2025-01-06",
                "2025-01-08",
                "2025-01-10",
                "2025-01-13",
                "2025-01-15",
                "2025-01-17",
            ],
        },
        OccurrenceCase {
            name: "weekly_every_other_monday",
            rule: r#"{"type":"weekly","interval":2,"days":[1]}"#,
            anchor: "2025-01-06T08:00:00",
            from: "2025-01-05",
            to: "2025-02-01",
            expected: &["2025-01-06", "2025-01-20"],
        },
        OccurrenceCase {
            name: "weekly_every_other_week_window_in_idle_week",
            rule: r#"{"type":"weekly","interval":2,"days":[1]}"#,
            anchor: "2025-01-06T08:00:00",
            from: "2025-01-13",
            to: "2025-02-09",
            expected: &["2025-01-20", "2025-02-03"],
        },
        OccurrenceCase {
            name: "weekly_window_starts_mid_week",
            rule: r#"{"type":"weekly","interval":1,"days":[2,4]}"#,
            anchor: "2025-01-07T12:00:00",
            from: "2025-01-10",
            to: "2025-01-21",
            expected: &["2025-01-14", "2025-01-16", "2025-01-21"],
        },
        OccurrenceCase {
            name: "weekly_without_days_uses_anchor_weekday",
            rule: r#"{"type":"weekly","interval":1}"#,
            anchor: "2025-01-01T10:00:00",
            from: "2025-01-01",
            to: "2025-01-31",
            expected: &[
                "2025-01-01",
                "2025-01-08",
                "2025-01-15",
                "2025-01-22",
                "2025-01-29",
            ],
        },
        OccurrenceCase {
            name: "weekly_empty_days_falls_back",
            rule: r#"{"type":"weekly","interval":2,"days":[]}"#,
            anchor: "2025-01-01T10:00:00",
            from: "2025-01-01",
            to: "2025-01-31",
            expected: &["2025-01-01", "2025-01-15", "2025-01-29"],
        },
        OccurrenceCase {
            name: "monthly_basic",
            rule: r#"{"type":"monthly","interval":1}"#,
            anchor: "2025-01-15T09:00:00",
            from: "2025-01-01",
            to: "2025-03-31",
            expected: &["2025-01-15", "2025-02-15", "2025-03-15"],
        },
        OccurrenceCase {
            name: "monthly_clamps_to_end_of_month",
            rule: r#"{"type":"monthly","interval":1}"#,
            anchor: "2024-01-31T09:00:00",
            from: "2024-01-01",
            to: "2024-03-31",
            expected: &["2024-01-31", "2024-02-29", "2024-03-31"],
        },
        OccurrenceCase {
            name: "monthly_every_two_keeps_anchor_cadence",
            rule: r#"{"type":"monthly","interval":2}"#,
            anchor: "2025-01-10T09:00:00",
            from: "2025-02-01",
            to: "2025-04-30",
            expected: &["2025-03-10"],
        },
        OccurrenceCase {
            name: "until_is_inclusive",
            rule: r#"{"type":"daily","interval":1,"until":"2025-01-03"}"#,
            anchor: "2025-01-01T09:00:00",
            from: "2025-01-01",
            to: "2025-01-10",
            expected: &["2025-01-01", "2025-01-02", "2025-01-03"],
        },
        OccurrenceCase {
            name: "horizon_caps_long_window",
            rule: r#"{"type":"daily","interval":30}"#,
            anchor: "2025-01-01T09:00:00",
            from: "2025-01-01",
            to: "2025-12-31",
            expected: &["2025-01-01", "2025-01-31", "2025-03-02", "2025-04-01"],
        },
        OccurrenceCase {
            name: "anchor_after_window",
            rule: r#"{"type":"daily","interval":1}"#,
            anchor: "2025-02-01T09:00:00",
            from: "2025-01-01",
            to: "2025-01-31",
            expected: &[],
        },
    ]
}

/// Runs one case through `expand(rule_json, anchor, from, to)`.
pub fn assert_case(
    case: &OccurrenceCase,
    expand: impl Fn(&str, &str, NaiveDate, NaiveDate) -> Vec<NaiveDate>,
) {
    let actual = expand(
        case.rule,
        case.anchor,
        parse_date(case.from),
        parse_date(case.to),
    );
    let expected: Vec<NaiveDate> = case.expected.iter().map(|value| parse_date(value)).collect();

    assert_eq!(actual, expected, "Case {} did not match", case.name);
}

pub fn parse_date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .unwrap_or_else(|err| panic!("Failed to parse date {value}: {err}"))
}
