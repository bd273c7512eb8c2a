//! Buddhist-era conversion and Thailand civil time.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

/// Years between the Buddhist and Christian eras.
pub const BUDDHIST_ERA_OFFSET: i32 = 543;

/// Thailand civil time is a fixed UTC+7 (no daylight saving).
pub const THAILAND_UTC_OFFSET_HOURS: i64 = 7;

/// Convert a UTC instant to Thailand wall-clock time.
pub fn to_thailand_time(instant: DateTime<Utc>) -> NaiveDateTime {
    instant.naive_utc() + Duration::hours(THAILAND_UTC_OFFSET_HOURS)
}

/// Current Thailand wall-clock time.
pub fn thailand_now() -> NaiveDateTime {
    to_thailand_time(Utc::now())
}

pub fn to_buddhist_year(christian_year: i32) -> i32 {
    christian_year + BUDDHIST_ERA_OFFSET
}

pub fn to_christian_year(buddhist_year: i32) -> i32 {
    buddhist_year - BUDDHIST_ERA_OFFSET
}

/// Split a `YYYY-MM-DD` string into its year and the untouched `MM-DD` tail.
fn split_date_string(date: &str) -> Option<(i32, &str)> {
    let date = date.trim();
    let bytes = date.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shaped {
        return None;
    }
    let year = date[..4].parse().ok()?;
    Some((year, &date[4..]))
}

/// Gregorian `YYYY-MM-DD` → Buddhist `YYYY-MM-DD`.
///
/// Only the year changes; month and day are not checked against the calendar.
/// Returns `None` when the input is not shaped like `YYYY-MM-DD`.
pub fn to_buddhist_date_string(gregorian: &str) -> Option<String> {
    let (year, rest) = split_date_string(gregorian)?;
    Some(format!("{:04}{}", to_buddhist_year(year), rest))
}

/// Buddhist `YYYY-MM-DD` → Gregorian `YYYY-MM-DD`.
pub fn to_gregorian_date_string(buddhist: &str) -> Option<String> {
    let (year, rest) = split_date_string(buddhist)?;
    Some(format!("{:04}{}", to_christian_year(year), rest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_thailand_time_crosses_midnight() {
        let instant = Utc.with_ymd_and_hms(2024, 12, 31, 18, 30, 0).unwrap();
        let local = to_thailand_time(instant);
        assert_eq!(local.to_string(), "2025-01-01 01:30:00");
    }

    #[test]
    fn test_date_string_conversion() {
        assert_eq!(to_buddhist_date_string("2024-03-15").as_deref(), Some("2567-03-15"));
        assert_eq!(to_gregorian_date_string("2567-03-15").as_deref(), Some("2024-03-15"));
    }

    #[test]
    fn test_conversion_keeps_invalid_calendar_days() {
        assert_eq!(to_buddhist_date_string("2024-02-30").as_deref(), Some("2567-02-30"));
        assert_eq!(to_gregorian_date_string("2567-13-99").as_deref(), Some("2024-13-99"));
    }

    #[test]
    fn test_conversion_rejects_malformed() {
        assert_eq!(to_buddhist_date_string("15/03/2024"), None);
        assert_eq!(to_buddhist_date_string("2024-3-15"), None);
        assert_eq!(to_buddhist_date_string(""), None);
        assert_eq!(to_gregorian_date_string("2567-03-15T00:00"), None);
    }

    #[test]
    fn test_conversion_trims() {
        assert_eq!(to_buddhist_date_string(" 2024-03-15 ").as_deref(), Some("2567-03-15"));
    }
}
