//! Visit Number (VN) codec.
//!
//! Format: `VN` + B.E. year (2 digits) + month (2) + day (2) + sequence (3),
//! e.g. `VN670315042` for the 42nd visit on 15 March 2567 (2024).
//!
//! The client only proposes a VN; the backend owns the collision-free
//! sequence and may reassign the last three digits.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::calendar::{to_buddhist_year, to_christian_year, to_thailand_time};
use crate::error::ClinicError;

pub const VN_PREFIX: &str = "VN";
pub const VN_LENGTH: usize = 11;

/// Largest sequence number a VN can carry.
pub const MAX_SEQUENCE: u16 = 999;

/// Century prefix used to rebuild a four-digit B.E. year.
const BUDDHIST_CENTURY: i32 = 2500;

/// Fields recovered from a VN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VnComponents {
    pub buddhist_year: i32,
    pub christian_year: i32,
    /// Not checked against the calendar (any two digits)
    pub month: u32,
    /// Not checked against the calendar (any two digits)
    pub day: u32,
    pub running_number: u32,
    /// Gregorian `YYYY-MM-DD`
    pub date_string: String,
    /// Buddhist `YYYY-MM-DD`
    pub buddhist_date_string: String,
}

/// Propose a VN for a visit starting at `now`, with a random placeholder sequence.
pub fn generate_vno(now: DateTime<Utc>) -> String {
    let sequence = rand::thread_rng().gen_range(1..=MAX_SEQUENCE);
    generate_vno_with_sequence(now, sequence)
}

/// Propose a VN for a visit starting right now.
pub fn generate_vno_now() -> String {
    generate_vno(Utc::now())
}

/// Build a VN for `now` (converted to Thailand civil date) and a known sequence.
///
/// Sequences above 999 are clamped to 999.
pub fn generate_vno_with_sequence(now: DateTime<Utc>, sequence: u16) -> String {
    let local = to_thailand_time(now);
    let year2 = to_buddhist_year(local.year()).rem_euclid(100);
    format!(
        "{}{:02}{:02}{:02}{:03}",
        VN_PREFIX,
        year2,
        local.month(),
        local.day(),
        sequence.min(MAX_SEQUENCE)
    )
}

/// True iff `vno` matches `^VN\d{9}$`.
pub fn is_valid_vno(vno: &str) -> bool {
    vno.len() == VN_LENGTH
        && vno.starts_with(VN_PREFIX)
        && vno.as_bytes()[VN_PREFIX.len()..]
            .iter()
            .all(u8::is_ascii_digit)
}

/// Parse a VN back into its date and sequence. `None` for anything invalid.
pub fn extract_date_from_vno(vno: &str) -> Option<VnComponents> {
    if !is_valid_vno(vno) {
        tracing::debug!(vno, "rejected malformed visit number");
        return None;
    }

    let digits = &vno[VN_PREFIX.len()..];
    let year2: i32 = digits[0..2].parse().ok()?;
    let month: u32 = digits[2..4].parse().ok()?;
    let day: u32 = digits[4..6].parse().ok()?;
    let running_number: u32 = digits[6..9].parse().ok()?;

    let buddhist_year = BUDDHIST_CENTURY + year2;
    let christian_year = to_christian_year(buddhist_year);

    Some(VnComponents {
        buddhist_year,
        christian_year,
        month,
        day,
        running_number,
        date_string: format!("{:04}-{:02}-{:02}", christian_year, month, day),
        buddhist_date_string: format!("{:04}-{:02}-{:02}", buddhist_year, month, day),
    })
}

/// A VN that has passed the grammar check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VisitNumber(String);

impl VisitNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn components(&self) -> Option<VnComponents> {
        extract_date_from_vno(&self.0)
    }
}

impl FromStr for VisitNumber {
    type Err = ClinicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if is_valid_vno(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(ClinicError::InvalidInput(format!("invalid visit number: {}", s)))
        }
    }
}

impl TryFrom<String> for VisitNumber {
    type Error = ClinicError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<VisitNumber> for String {
    fn from(vn: VisitNumber) -> Self {
        vn.0
    }
}

impl fmt::Display for VisitNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
