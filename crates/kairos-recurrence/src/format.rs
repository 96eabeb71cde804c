//! Human-readable rule descriptions.

use chrono::NaiveDate;
use kairos_core::types::Locale;

use crate::rule::{RecurrenceRule, RecurrenceType};

struct Phrases {
    none: &'static str,
    unknown: &'static str,
    every: &'static str,
    days: &'static str,
    weeks: &'static str,
    months: &'static str,
    every_singular_day: &'static str,
    every_singular_week: &'static str,
    every_singular_month: &'static str,
    weekday_abbrev: [&'static str; 7],
    until: &'static str,
    date_format: &'static str,
}

const ENGLISH: Phrases = Phrases {
    none: "None",
    unknown: "Unknown",
    every: "Every",
    days: "days",
    weeks: "weeks",
    months: "months",
    every_singular_day: "Every day",
    every_singular_week: "Every week",
    every_singular_month: "Every month",
    weekday_abbrev: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
    until: "until",
    date_format: "%b %-d, %Y",
};

const ITALIAN: Phrases = Phrases {
    none: "Nessuna",
    unknown: "Sconosciuta",
    every: "Ogni",
    days: "giorni",
    weeks: "settimane",
    months: "mesi",
    every_singular_day: "Ogni giorno",
    every_singular_week: "Ogni settimana",
    every_singular_month: "Ogni mese",
    weekday_abbrev: ["Dom", "Lun", "Mar", "Mer", "Gio", "Ven", "Sab"],
    until: "fino al",
    date_format: "%-d/%-m/%Y",
};

const fn phrases(locale: Locale) -> &'static Phrases {
    match locale {
        Locale::English => &ENGLISH,
        Locale::Italian => &ITALIAN,
    }
}

/// ## Summary
/// Describes a rule for display, e.g. `"Every 2 weeks: Mon, Thu until Mar 1, 2025"`.
///
/// `None` renders as `"None"` (`"Nessuna"`). The result depends only on the
/// arguments.
#[must_use]
pub fn format_recurrence(rule: Option<&RecurrenceRule>, locale: Locale) -> String {
    let p = phrases(locale);
    let Some(rule) = rule else {
        return p.none.to_string();
    };

    let mut text = match rule.kind {
        RecurrenceType::Daily | RecurrenceType::Custom => {
            cadence(p, rule.interval, p.every_singular_day, p.days)
        }
        RecurrenceType::Weekly => {
            let base = cadence(p, rule.interval, p.every_singular_week, p.weeks);
            match rule.weekday_mask().filter(|mask| !mask.is_empty()) {
                Some(mask) => {
                    let names: Vec<&str> = mask
                        .numbers()
                        .map(|day| p.weekday_abbrev[usize::from(day)])
                        .collect();
                    format!("{base}: {}", names.join(", "))
                }
                None => base,
            }
        }
        RecurrenceType::Monthly => {
            cadence(p, rule.interval, p.every_singular_month, p.months)
        }
        RecurrenceType::Unknown => p.unknown.to_string(),
    };

    if let Some(until) = rule.until {
        text.push(' ');
        text.push_str(&until_clause(p, until));
    }

    text
}

fn cadence(p: &Phrases, interval: i32, singular: &str, units: &str) -> String {
    if interval == 1 {
        singular.to_string()
    } else {
        format!("{} {interval} {units}", p.every)
    }
}

fn until_clause(p: &Phrases, until: NaiveDate) -> String {
    format!("{} {}", p.until, until.format(p.date_format))
}
