//! Treatment payload validation.
//!
//! Collects every problem in one pass so the form can show them together.
//! Hard limits come from [`ValidationLimits`]; they are separate from the
//! clinical warning ranges in [`crate::clinical::vitals`].

use serde_json::Value;
use thiserror::Error;

use super::normalizer::Normalizer;
use crate::calendar::parse_local_datetime;
use crate::config::{ClinicConfig, ValidationLimits, ValueRange};
use crate::identifiers::is_valid_vno;
use crate::models::keys::*;
use crate::models::{text_from_value, LineKind, RawTreatment, TreatmentStatus};

/// One problem found in a treatment payload.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationIssue {
    #[error("กรุณาระบุเลข VN")]
    MissingVisitNumber,

    #[error("กรุณาระบุเลข HN")]
    MissingHospitalNumber,

    #[error("กรุณาระบุรหัสแพทย์")]
    MissingDoctor,

    #[error("กรุณาระบุวันที่รับบริการ")]
    MissingVisitDate,

    #[error("รูปแบบเลข VN ไม่ถูกต้อง: {0}")]
    InvalidVisitNumber(String),

    #[error("หัตถการรายการที่ {position} ไม่มีชื่อ")]
    UnnamedProcedure { position: usize },

    #[error("{field} ต้องเป็นตัวเลข: {value}")]
    NotANumber { field: &'static str, value: String },

    #[error("{field} ต้องอยู่ระหว่าง {min} - {max} (ได้รับ {value})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} ต้องไม่ติดลบ (ได้รับ {value})")]
    NegativeAmount { field: &'static str, value: f64 },

    #[error("รูปแบบวันที่ไม่ถูกต้อง ({field}): {value}")]
    InvalidDate { field: &'static str, value: String },

    #[error("สถานะไม่ถูกต้อง: {0}")]
    UnknownStatus(String),
}

/// Validator for treatment payloads.
pub struct TreatmentValidator<'a> {
    limits: &'a ValidationLimits,
    normalizer: Normalizer,
}

impl<'a> TreatmentValidator<'a> {
    /// Create a validator using the configured limits.
    pub fn new(config: &'a ClinicConfig) -> Self {
        Self::with_limits(&config.validation_limits)
    }

    pub fn with_limits(limits: &'a ValidationLimits) -> Self {
        Self {
            limits,
            normalizer: Normalizer::new(),
        }
    }

    /// Check a payload. Returns every issue found; empty means valid.
    pub fn validate(&self, raw: &RawTreatment) -> Vec<ValidationIssue> {
        let raw = self.normalizer.canonicalize(raw);
        let mut issues = Vec::new();

        self.check_required(&raw, &mut issues);

        if let Some(vno) = raw.text(VNO) {
            if !is_valid_vno(&vno) {
                issues.push(ValidationIssue::InvalidVisitNumber(vno));
            }
        }

        self.check_procedures(&raw, &mut issues);

        let limits = self.limits;
        let vital_limits: [(&str, &'static str, &ValueRange); 7] = [
            (WEIGHT1, "น้ำหนัก", &limits.weight_kg),
            (HIGHT1, "ส่วนสูง", &limits.height_cm),
            (BT1, "อุณหภูมิร่างกาย", &limits.temperature_c),
            (BP1, "ความดันตัวบน", &limits.systolic_mmhg),
            (BP2, "ความดันตัวล่าง", &limits.diastolic_mmhg),
            (PR1, "ชีพจร", &limits.pulse_bpm),
            (SPO2, "ออกซิเจนในเลือด", &limits.spo2_percent),
        ];
        for (key, field, range) in vital_limits {
            if let Some(value) = self.read_number(&raw, key, field, &mut issues) {
                if !range.contains(value) {
                    issues.push(ValidationIssue::OutOfRange {
                        field,
                        value,
                        min: range.min,
                        max: range.max,
                    });
                }
            }
        }

        for key in MONEY {
            if let Some(value) = self.read_number(&raw, key, money_label(key), &mut issues) {
                if value < 0.0 {
                    issues.push(ValidationIssue::NegativeAmount {
                        field: money_label(key),
                        value,
                    });
                }
            }
        }

        for (key, field) in [(RDATE, "วันที่รับบริการ"), (APPOINTMENT_DATE, "วันนัด")] {
            if let Some(value) = raw.text(key) {
                if parse_local_datetime(&value).is_none() {
                    issues.push(ValidationIssue::InvalidDate { field, value });
                }
            }
        }

        if let Some(status) = raw.text(STATUS1) {
            if TreatmentStatus::from_label(&status).is_none() {
                issues.push(ValidationIssue::UnknownStatus(status));
            }
        }

        if !issues.is_empty() {
            tracing::debug!(count = issues.len(), "treatment payload failed validation");
        }
        issues
    }

    fn check_required(&self, raw: &RawTreatment, issues: &mut Vec<ValidationIssue>) {
        if !raw.is_present(VNO) {
            issues.push(ValidationIssue::MissingVisitNumber);
        }
        if !raw.is_present(HNNO) {
            issues.push(ValidationIssue::MissingHospitalNumber);
        }
        if !raw.is_present(EMP_CODE) {
            issues.push(ValidationIssue::MissingDoctor);
        }
        if !raw.is_present(RDATE) {
            issues.push(ValidationIssue::MissingVisitDate);
        }
    }

    fn check_procedures(&self, raw: &RawTreatment, issues: &mut Vec<ValidationIssue>) {
        let name_keys = LineKind::Procedure.name_keys();
        for (index, item) in raw.array(PROCEDURES).iter().enumerate() {
            let named = match item {
                Value::Object(map) => name_keys
                    .iter()
                    .any(|key| map.get(*key).and_then(text_from_value).is_some()),
                _ => false,
            };
            if !named {
                issues.push(ValidationIssue::UnnamedProcedure {
                    position: index + 1,
                });
            }
        }
    }

    /// Read a supplied numeric field, recording an issue if it is not a number.
    fn read_number(
        &self,
        raw: &RawTreatment,
        key: &str,
        field: &'static str,
        issues: &mut Vec<ValidationIssue>,
    ) -> Option<f64> {
        if !raw.is_present(key) {
            return None;
        }
        let value = raw.number(key);
        if value.is_none() {
            let text = raw
                .get(key)
                .map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .unwrap_or_default();
            issues.push(ValidationIssue::NotANumber { field, value: text });
        }
        value
    }
}

fn money_label(key: &str) -> &'static str {
    match key {
        TOTAL_AMOUNT => "ยอดรวม",
        DISCOUNT_AMOUNT => "ส่วนลด",
        NET_AMOUNT => "ยอดสุทธิ",
        RECEIVED_AMOUNT => "รับเงิน",
        CHANGE_AMOUNT => "เงินทอน",
        _ => "จำนวนเงิน",
    }
}

/// Validate with the default limits, returning typed issues.
pub fn validate_treatment(raw: &RawTreatment) -> Vec<ValidationIssue> {
    let limits = ValidationLimits::default();
    TreatmentValidator::with_limits(&limits).validate(raw)
}

/// Validate with the default limits, returning display messages.
pub fn validate_treatment_data(raw: &RawTreatment) -> Vec<String> {
    validate_treatment(raw)
        .iter()
        .map(ToString::to_string)
        .collect()
}
