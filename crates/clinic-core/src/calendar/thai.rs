//! Thai long-form date formatting.

use std::fmt;

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use super::buddhist::{to_buddhist_year, to_thailand_time};

/// Thai month names, January first.
pub const THAI_MONTHS: [&str; 12] = [
    "มกราคม",
    "กุมภาพันธ์",
    "มีนาคม",
    "เมษายน",
    "พฤษภาคม",
    "มิถุนายน",
    "กรกฎาคม",
    "สิงหาคม",
    "กันยายน",
    "ตุลาคม",
    "พฤศจิกายน",
    "ธันวาคม",
];

/// Abbreviated Thai month names, January first.
pub const THAI_MONTHS_SHORT: [&str; 12] = [
    "ม.ค.", "ก.พ.", "มี.ค.", "เม.ย.", "พ.ค.", "มิ.ย.", "ก.ค.", "ส.ค.", "ก.ย.", "ต.ค.", "พ.ย.",
    "ธ.ค.",
];

/// Result of best-effort date formatting.
///
/// Display paths render either variant; `Raw` marks input that could not be
/// parsed and is echoed back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThaiDate {
    Formatted(String),
    Raw(String),
}

impl ThaiDate {
    pub fn as_str(&self) -> &str {
        match self {
            ThaiDate::Formatted(s) | ThaiDate::Raw(s) => s,
        }
    }

    pub fn is_formatted(&self) -> bool {
        matches!(self, ThaiDate::Formatted(_))
    }

    pub fn into_string(self) -> String {
        match self {
            ThaiDate::Formatted(s) | ThaiDate::Raw(s) => s,
        }
    }
}

impl fmt::Display for ThaiDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const NAIVE_DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

/// Parse a date or timestamp into Thailand wall-clock time.
///
/// Offset-carrying timestamps (RFC 3339) are converted to UTC+7; naive
/// timestamps and plain dates are taken as already local. A day past the
/// end of its month (up to 31) rolls over, so `2024-02-30` is 1 March.
pub fn parse_local_datetime(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(input) {
        return Some(to_thailand_time(instant.with_timezone(&Utc)));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(local) = NaiveDateTime::parse_from_str(input, format) {
            return Some(local);
        }
    }

    ["%Y-%m-%d", "%Y/%m/%d"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .or_else(|| parse_rollover(input))
}

fn parse_rollover(input: &str) -> Option<NaiveDateTime> {
    let (date, time) = match input.split_once(|c| c == 'T' || c == ' ') {
        Some((date, time)) => (date, Some(time)),
        None => (input, None),
    };

    let mut parts = date.split(|c| c == '-' || c == '/');
    let year: i32 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let day: u32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || !(1..=31).contains(&day) {
        return None;
    }
    let date = NaiveDate::from_ymd_opt(year, month, 1)?
        .checked_add_days(Days::new(u64::from(day - 1)))?;

    let time = match time {
        Some(time) => ["%H:%M:%S%.f", "%H:%M"]
            .iter()
            .find_map(|format| NaiveTime::parse_from_str(time, format).ok())?,
        None => NaiveTime::MIN,
    };
    Some(date.and_time(time))
}

/// `15 มีนาคม 2567` for 2024-03-15.
pub fn format_thai_date_of(date: NaiveDate) -> String {
    format!(
        "{} {} {}",
        date.day(),
        THAI_MONTHS[date.month0() as usize],
        to_buddhist_year(date.year())
    )
}

/// Format any parseable date as `{day} {Thai month} {B.E. year}`.
pub fn format_thai_date(input: &str) -> ThaiDate {
    match parse_local_datetime(input) {
        Some(local) => ThaiDate::Formatted(format_thai_date_of(local.date())),
        None => fallback(input),
    }
}

/// Format with the abbreviated month name: `15 มี.ค. 2567`.
pub fn format_thai_short_date(input: &str) -> ThaiDate {
    match parse_local_datetime(input) {
        Some(local) => ThaiDate::Formatted(format!(
            "{} {} {}",
            local.day(),
            THAI_MONTHS_SHORT[local.month0() as usize],
            to_buddhist_year(local.year())
        )),
        None => fallback(input),
    }
}

/// `15 มีนาคม 2567 เวลา 14:05 น.`
pub fn format_thai_date_time_of(local: NaiveDateTime) -> String {
    format!(
        "{} เวลา {:02}:{:02} น.",
        format_thai_date_of(local.date()),
        local.hour(),
        local.minute()
    )
}

/// Format any parseable timestamp with its time of day.
pub fn format_thai_date_time(input: &str) -> ThaiDate {
    match parse_local_datetime(input) {
        Some(local) => ThaiDate::Formatted(format_thai_date_time_of(local)),
        None => fallback(input),
    }
}

fn fallback(input: &str) -> ThaiDate {
    tracing::debug!(input, "unparseable date echoed back unformatted");
    ThaiDate::Raw(input.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_plain_date() {
        let formatted = format_thai_date("2024-03-15");
        assert_eq!(formatted, ThaiDate::Formatted("15 มีนาคม 2567".into()));
    }

    #[test]
    fn test_format_rfc3339_converts_to_thailand() {
        // 20:00 UTC on the 31st is already the 1st in Bangkok
        let formatted = format_thai_date("2023-12-31T20:00:00Z");
        assert_eq!(formatted.as_str(), "1 มกราคม 2567");
    }

    #[test]
    fn test_format_naive_timestamp() {
        assert_eq!(format_thai_date("2024-07-01 09:30:00").as_str(), "1 กรกฎาคม 2567");
        assert_eq!(
            format_thai_date_time("2024-07-01T09:30:00").as_str(),
            "1 กรกฎาคม 2567 เวลา 09:30 น."
        );
    }

    #[test]
    fn test_short_date() {
        assert_eq!(format_thai_short_date("2024-12-05").as_str(), "5 ธ.ค. 2567");
    }

    #[test]
    fn test_unparseable_input_is_echoed() {
        let formatted = format_thai_date("not a date");
        assert!(!formatted.is_formatted());
        assert_eq!(formatted.to_string(), "not a date");

        assert_eq!(format_thai_date("2024-13-01"), ThaiDate::Raw("2024-13-01".into()));
        assert_eq!(format_thai_date("2024-03-32"), ThaiDate::Raw("2024-03-32".into()));
    }

    #[test]
    fn test_day_past_month_end_rolls_over() {
        assert_eq!(format_thai_date("2024-02-30").as_str(), "1 มีนาคม 2567");
        assert_eq!(format_thai_date("2023-02-29").as_str(), "1 มีนาคม 2566");
        assert_eq!(
            format_thai_date_time("2024-04-31 08:15").as_str(),
            "1 พฤษภาคม 2567 เวลา 08:15 น."
        );
    }

    #[test]
    fn test_month_table_complete() {
        assert_eq!(THAI_MONTHS.len(), 12);
        assert_eq!(THAI_MONTHS[0], "มกราคม");
        assert_eq!(THAI_MONTHS[11], "ธันวาคม");
    }
}
