use anyhow::{Result, anyhow};
use chrono::{Local, NaiveDate, Utc};
use chrono_tz::Tz;

/// ## Summary
/// Returns today's date in the configured IANA zone, or in system local time.
///
/// ## Errors
/// Returns an error if `timezone` is not a known IANA zone name.
pub fn today(timezone: Option<&str>) -> Result<NaiveDate> {
    match timezone {
        Some(name) => {
            let tz: Tz = name
                .parse()
                .map_err(|e| anyhow!("unknown time zone {name:?}: {e}"))?;
            Ok(Utc::now().with_timezone(&tz).date_naive())
        }
        None => Ok(Local::now().date_naive()),
    }
}
