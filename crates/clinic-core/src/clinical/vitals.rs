//! Abnormal vital-sign detection.
//!
//! Reference ranges (inclusive):
//! - Temperature: 36.0 - 37.5 °C
//! - Systolic BP: 90 - 140 mmHg
//! - Diastolic BP: 60 - 100 mmHg
//! - Pulse: 60 - 100 bpm
//! - SpO2: >= 95 %
//!
//! Systolic and diastolic are judged together when both are present, so a
//! reading yields at most one blood-pressure warning.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ValueRange;
use crate::models::VitalSigns;

pub const TEMPERATURE_RANGE: ValueRange = ValueRange::new(36.0, 37.5);
pub const SYSTOLIC_RANGE: ValueRange = ValueRange::new(90.0, 140.0);
pub const DIASTOLIC_RANGE: ValueRange = ValueRange::new(60.0, 100.0);
pub const PULSE_RANGE: ValueRange = ValueRange::new(60.0, 100.0);
pub const SPO2_MIN: f64 = 95.0;

/// Which side of the reference range a reading fell on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    High,
    Low,
}

impl Direction {
    fn of(value: f64, range: &ValueRange) -> Option<Self> {
        if value > range.max {
            Some(Direction::High)
        } else if value < range.min {
            Some(Direction::Low)
        } else {
            None
        }
    }

    fn thai(self) -> &'static str {
        match self {
            Direction::High => "สูง",
            Direction::Low => "ต่ำ",
        }
    }
}

/// Joint verdict on a systolic/diastolic pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BloodPressureFinding {
    /// Either value above its upper bound
    Hypertension,
    /// Either value below its lower bound
    Hypotension,
    /// One value above and the other below
    Mixed,
}

/// A reading outside its reference range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VitalWarning {
    Temperature {
        value: f64,
        direction: Direction,
    },
    BloodPressure {
        systolic: f64,
        diastolic: f64,
        finding: BloodPressureFinding,
    },
    Systolic {
        value: f64,
        direction: Direction,
    },
    Diastolic {
        value: f64,
        direction: Direction,
    },
    Pulse {
        value: f64,
        direction: Direction,
    },
    LowOxygen {
        value: f64,
    },
}

impl fmt::Display for VitalWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VitalWarning::Temperature { value, .. } => write!(
                f,
                "อุณหภูมิร่างกายผิดปกติ: {}°C (ปกติ {:.1}-{:.1}°C)",
                value, TEMPERATURE_RANGE.min, TEMPERATURE_RANGE.max
            ),
            VitalWarning::BloodPressure {
                systolic,
                diastolic,
                finding,
            } => {
                let label = match finding {
                    BloodPressureFinding::Hypertension => "ความดันโลหิตสูง",
                    BloodPressureFinding::Hypotension => "ความดันโลหิตต่ำ",
                    BloodPressureFinding::Mixed => "ความดันโลหิตผิดปกติ",
                };
                write!(
                    f,
                    "{}: {}/{} mmHg (ปกติ {}-{}/{}-{} mmHg)",
                    label,
                    systolic,
                    diastolic,
                    SYSTOLIC_RANGE.min,
                    SYSTOLIC_RANGE.max,
                    DIASTOLIC_RANGE.min,
                    DIASTOLIC_RANGE.max
                )
            }
            VitalWarning::Systolic { value, direction } => write!(
                f,
                "ความดันตัวบน{}: {} mmHg (ปกติ {}-{} mmHg)",
                direction.thai(),
                value,
                SYSTOLIC_RANGE.min,
                SYSTOLIC_RANGE.max
            ),
            VitalWarning::Diastolic { value, direction } => write!(
                f,
                "ความดันตัวล่าง{}: {} mmHg (ปกติ {}-{} mmHg)",
                direction.thai(),
                value,
                DIASTOLIC_RANGE.min,
                DIASTOLIC_RANGE.max
            ),
            VitalWarning::Pulse { value, .. } => write!(
                f,
                "ชีพจรผิดปกติ: {} ครั้ง/นาที (ปกติ {}-{} ครั้ง/นาที)",
                value, PULSE_RANGE.min, PULSE_RANGE.max
            ),
            VitalWarning::LowOxygen { value } => write!(
                f,
                "ออกซิเจนในเลือดต่ำ: {}% (ปกติ ≥ {}%)",
                value, SPO2_MIN
            ),
        }
    }
}

/// Collect warnings for every supplied reading outside its range.
///
/// Absent readings are skipped. Never fails; an empty list means all
/// supplied readings are normal.
pub fn check_vitals(vitals: &VitalSigns) -> Vec<VitalWarning> {
    let mut warnings = Vec::new();

    if let Some(value) = vitals.temperature {
        if let Some(direction) = Direction::of(value, &TEMPERATURE_RANGE) {
            warnings.push(VitalWarning::Temperature { value, direction });
        }
    }

    match (vitals.systolic, vitals.diastolic) {
        (Some(systolic), Some(diastolic)) => {
            if let Some(finding) = blood_pressure_finding(systolic, diastolic) {
                warnings.push(VitalWarning::BloodPressure {
                    systolic,
                    diastolic,
                    finding,
                });
            }
        }
        (Some(value), None) => {
            if let Some(direction) = Direction::of(value, &SYSTOLIC_RANGE) {
                warnings.push(VitalWarning::Systolic { value, direction });
            }
        }
        (None, Some(value)) => {
            if let Some(direction) = Direction::of(value, &DIASTOLIC_RANGE) {
                warnings.push(VitalWarning::Diastolic { value, direction });
            }
        }
        (None, None) => {}
    }

    if let Some(value) = vitals.pulse_rate {
        if let Some(direction) = Direction::of(value, &PULSE_RANGE) {
            warnings.push(VitalWarning::Pulse { value, direction });
        }
    }

    if let Some(value) = vitals.spo2 {
        if value < SPO2_MIN {
            warnings.push(VitalWarning::LowOxygen { value });
        }
    }

    warnings
}

/// Human-readable warning messages for display.
pub fn check_abnormal_vitals(vitals: &VitalSigns) -> Vec<String> {
    check_vitals(vitals).iter().map(ToString::to_string).collect()
}

fn blood_pressure_finding(systolic: f64, diastolic: f64) -> Option<BloodPressureFinding> {
    let high = systolic > SYSTOLIC_RANGE.max || diastolic > DIASTOLIC_RANGE.max;
    let low = systolic < SYSTOLIC_RANGE.min || diastolic < DIASTOLIC_RANGE.min;

    match (high, low) {
        (false, false) => None,
        (true, false) => Some(BloodPressureFinding::Hypertension),
        (false, true) => Some(BloodPressureFinding::Hypotension),
        (true, true) => Some(BloodPressureFinding::Mixed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bp(systolic: Option<f64>, diastolic: Option<f64>) -> VitalSigns {
        VitalSigns {
            systolic,
            diastolic,
            ..VitalSigns::default()
        }
    }

    #[test]
    fn test_no_readings_no_warnings() {
        assert!(check_vitals(&VitalSigns::default()).is_empty());
    }

    #[test]
    fn test_normal_readings() {
        let vitals = VitalSigns {
            temperature: Some(36.8),
            systolic: Some(120.0),
            diastolic: Some(80.0),
            pulse_rate: Some(72.0),
            spo2: Some(98.0),
            ..VitalSigns::default()
        };
        assert!(check_abnormal_vitals(&vitals).is_empty());
    }

    #[test]
    fn test_range_bounds_are_normal() {
        let vitals = VitalSigns {
            temperature: Some(37.5),
            systolic: Some(140.0),
            diastolic: Some(60.0),
            pulse_rate: Some(100.0),
            spo2: Some(95.0),
            ..VitalSigns::default()
        };
        assert!(check_vitals(&vitals).is_empty());
    }

    #[test]
    fn test_hypertension_single_warning() {
        let warnings = check_vitals(&bp(Some(150.0), Some(95.0)));
        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            warnings[0],
            VitalWarning::BloodPressure {
                finding: BloodPressureFinding::Hypertension,
                ..
            }
        ));
        assert!(warnings[0].to_string().contains("ความดันโลหิตสูง"));
        assert!(warnings[0].to_string().contains("150/95"));
    }

    #[test]
    fn test_hypotension_single_warning() {
        let warnings = check_vitals(&bp(Some(85.0), Some(55.0)));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].to_string().starts_with("ความดันโลหิตต่ำ"));
    }

    #[test]
    fn test_mixed_pressure_single_abnormal_warning() {
        let warnings = check_vitals(&bp(Some(150.0), Some(55.0)));
        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            warnings[0],
            VitalWarning::BloodPressure {
                finding: BloodPressureFinding::Mixed,
                ..
            }
        ));
        assert!(warnings[0].to_string().contains("ผิดปกติ"));
    }

    #[test]
    fn test_lone_systolic_is_one_sided() {
        let warnings = check_vitals(&bp(Some(160.0), None));
        assert_eq!(
            warnings,
            vec![VitalWarning::Systolic {
                value: 160.0,
                direction: Direction::High
            }]
        );
        assert_eq!(
            warnings[0].to_string(),
            "ความดันตัวบนสูง: 160 mmHg (ปกติ 90-140 mmHg)"
        );
    }

    #[test]
    fn test_lone_diastolic_low() {
        let warnings = check_vitals(&bp(None, Some(50.0)));
        assert_eq!(
            warnings,
            vec![VitalWarning::Diastolic {
                value: 50.0,
                direction: Direction::Low
            }]
        );
    }

    #[test]
    fn test_independent_checks() {
        let vitals = VitalSigns {
            temperature: Some(38.5),
            pulse_rate: Some(120.0),
            spo2: Some(92.0),
            ..VitalSigns::default()
        };
        let messages = check_abnormal_vitals(&vitals);
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0], "อุณหภูมิร่างกายผิดปกติ: 38.5°C (ปกติ 36.0-37.5°C)");
        assert!(messages[1].starts_with("ชีพจรผิดปกติ"));
        assert_eq!(messages[2], "ออกซิเจนในเลือดต่ำ: 92% (ปกติ ≥ 95%)");
    }

    #[test]
    fn test_idempotent() {
        let vitals = VitalSigns {
            temperature: Some(35.0),
            systolic: Some(150.0),
            diastolic: Some(55.0),
            ..VitalSigns::default()
        };
        assert_eq!(check_abnormal_vitals(&vitals), check_abnormal_vitals(&vitals));
    }
}
