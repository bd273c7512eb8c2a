//! Age calculation for patient history screens.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Completed years, months and days between two dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Age {
    pub years: u32,
    pub months: u32,
    pub days: u32,
}

impl Age {
    /// `34 ปี 2 เดือน 5 วัน`
    pub fn to_thai_string(&self) -> String {
        format!("{} ปี {} เดือน {} วัน", self.years, self.months, self.days)
    }
}

/// Age on `on` of someone born on `birth`. `None` if `birth` is after `on`.
pub fn calculate_age(birth: NaiveDate, on: NaiveDate) -> Option<Age> {
    if birth > on {
        return None;
    }

    let mut years = on.year() - birth.year();
    let mut months = on.month() as i32 - birth.month() as i32;
    let mut days = on.day() as i32 - birth.day() as i32;

    if days < 0 {
        months -= 1;
        days += days_in_previous_month(on)? as i32;
    }
    if months < 0 {
        years -= 1;
        months += 12;
    }

    Some(Age {
        years: years as u32,
        months: months as u32,
        days: days as u32,
    })
}

fn days_in_previous_month(date: NaiveDate) -> Option<u32> {
    let first_of_month = date.with_day(1)?;
    Some((first_of_month - Duration::days(1)).day())
}
