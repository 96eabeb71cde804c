//! Lenient date parsing for stored task records.
//!
//! Records written by older clients carry either bare calendar dates, naive
//! local date-times, or RFC 3339 timestamps with an offset. All of them are
//! reduced to the wall-clock value the user picked.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATE_FORMAT: &str = "%Y-%m-%d";
const LOCAL_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// ## Summary
/// Parses a calendar date, accepting a full date-time and keeping its date part.
#[must_use]
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .or_else(|| parse_local_datetime(value).map(|dt| dt.date()))
}

/// ## Summary
/// Parses a wall-clock date-time.
///
/// Offsets are dropped rather than converted: `2025-01-01T09:00:00+01:00` is
/// nine o'clock on January 1st, which is what the planner displays.
#[must_use]
pub fn parse_local_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, DATE_FORMAT)
                .ok()
                .map(|date| date.and_time(chrono::NaiveTime::MIN))
        })
}

pub mod optional_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    #[expect(clippy::ref_option, reason = "signature required by serde(with)")]
    pub fn serialize<S: Serializer>(value: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(date) => s.serialize_str(&date.format(super::DATE_FORMAT).to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        Option::<String>::deserialize(d)?
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| {
                super::parse_calendar_date(&raw)
                    .ok_or_else(|| D::Error::custom(format!("invalid calendar date: {raw}")))
            })
            .transpose()
    }
}

pub mod optional_local_datetime {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    #[expect(clippy::ref_option, reason = "signature required by serde(with)")]
    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDateTime>,
        s: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => s.serialize_str(&dt.format(super::LOCAL_DATETIME_FORMAT).to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        Option::<String>::deserialize(d)?
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| {
                super::parse_local_datetime(&raw)
                    .ok_or_else(|| D::Error::custom(format!("invalid date-time: {raw}")))
            })
            .transpose()
    }
}
