//! Treatment (visit) records.
//!
//! [`RawTreatment`] is the loose record as it comes off a form or the
//! backend. [`Treatment`] is the strict, null-safe record produced by
//! [`crate::treatment::format_treatment_data`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::loose::{number_from_value, text_from_value};
use super::vitals::VitalSigns;
use crate::error::{ClinicError, ClinicResult};

/// Wire keys of the backend's treatment record.
pub mod keys {
    pub const VNO: &str = "VNO";
    pub const HNNO: &str = "HNNO";
    pub const RDATE: &str = "RDATE";
    pub const TRDATE: &str = "TRDATE";
    pub const WEIGHT1: &str = "WEIGHT1";
    pub const HIGHT1: &str = "HIGHT1";
    pub const BT1: &str = "BT1";
    pub const BP1: &str = "BP1";
    pub const BP2: &str = "BP2";
    pub const RR1: &str = "RR1";
    pub const PR1: &str = "PR1";
    pub const SPO2: &str = "SPO2";
    pub const SYMPTOM: &str = "SYMPTOM";
    pub const DXCODE: &str = "DXCODE";
    pub const ICD10CODE: &str = "ICD10CODE";
    pub const TREATMENT1: &str = "TREATMENT1";
    pub const EMP_CODE: &str = "EMP_CODE";
    pub const STATUS1: &str = "STATUS1";
    pub const APPOINTMENT_DATE: &str = "APPOINTMENT_DATE";
    pub const APPOINTMENT_TDATE: &str = "APPOINTMENT_TDATE";
    pub const INVESTIGATION_NOTE: &str = "INVESTIGATION_NOTE";
    pub const TOTAL_AMOUNT: &str = "TOTAL_AMOUNT";
    pub const DISCOUNT_AMOUNT: &str = "DISCOUNT_AMOUNT";
    pub const NET_AMOUNT: &str = "NET_AMOUNT";
    pub const PAYMENT_STATUS: &str = "PAYMENT_STATUS";
    pub const PAYMENT_DATE: &str = "PAYMENT_DATE";
    pub const PAYMENT_TIME: &str = "PAYMENT_TIME";
    pub const PAYMENT_METHOD: &str = "PAYMENT_METHOD";
    pub const RECEIVED_AMOUNT: &str = "RECEIVED_AMOUNT";
    pub const CHANGE_AMOUNT: &str = "CHANGE_AMOUNT";
    pub const CASHIER: &str = "CASHIER";
    pub const DRUGS: &str = "drugs";
    pub const PROCEDURES: &str = "procedures";
    pub const LAB_TESTS: &str = "labTests";
    pub const RADIO_TESTS: &str = "radioTests";
    pub const DIAGNOSIS: &str = "diagnosis";
    pub const CHIEF_COMPLAINT: &str = "CHIEF_COMPLAINT";
    pub const PRESENT_ILL: &str = "PRESENT_ILL";
    pub const PHYSICAL_EXAM: &str = "PHYSICAL_EXAM";
    pub const PLAN1: &str = "PLAN1";

    /// Monetary fields that must be non-negative when present.
    pub const MONEY: [&str; 5] = [
        TOTAL_AMOUNT,
        DISCOUNT_AMOUNT,
        NET_AMOUNT,
        RECEIVED_AMOUNT,
        CHANGE_AMOUNT,
    ];
}

/// A loosely-typed treatment record (any JSON object).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawTreatment {
    fields: Map<String, Value>,
}

impl RawTreatment {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a record from JSON text. The top level must be an object.
    pub fn from_json(json: &str) -> ClinicResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Wrap a JSON value. The value must be an object.
    pub fn from_value(value: Value) -> ClinicResult<Self> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(ClinicError::InvalidInput(format!(
                "treatment payload must be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Builder-style setter.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.fields.insert(key.to_string(), value.into());
    }

    /// Raw value for `key`; JSON `null` reads as absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|v| !v.is_null())
    }

    /// Trimmed text for `key`, `None` when absent or blank.
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).and_then(text_from_value)
    }

    /// Number for `key`, `None` when absent or not numeric.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(number_from_value)
    }

    /// Whether a non-blank value was supplied for `key`.
    pub fn is_present(&self, key: &str) -> bool {
        match self.get(key) {
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(_) => true,
            None => false,
        }
    }

    /// Array for `key` verbatim, or empty when absent or not an array.
    pub fn array(&self, key: &str) -> Vec<Value> {
        match self.get(key) {
            Some(Value::Array(items)) => items.clone(),
            _ => Vec::new(),
        }
    }

    /// Nested object for `key`.
    pub fn object(&self, key: &str) -> Option<RawTreatment> {
        match self.get(key) {
            Some(Value::Object(map)) => Some(RawTreatment { fields: map.clone() }),
            _ => None,
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Visit status.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum TreatmentStatus {
    /// Visit in progress
    #[default]
    #[serde(rename = "ทำงานอยู่")]
    Active,
    /// Visit finished (paid)
    #[serde(rename = "ปิดแล้ว")]
    Closed,
    /// Visit cancelled
    #[serde(rename = "ยกเลิก")]
    Canceled,
}

impl TreatmentStatus {
    pub fn label(self) -> &'static str {
        match self {
            TreatmentStatus::Active => "ทำงานอยู่",
            TreatmentStatus::Closed => "ปิดแล้ว",
            TreatmentStatus::Canceled => "ยกเลิก",
        }
    }

    /// Parse a status label as stored by the backend.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "ทำงานอยู่" => Some(TreatmentStatus::Active),
            "ปิดแล้ว" => Some(TreatmentStatus::Closed),
            "ยกเลิก" => Some(TreatmentStatus::Canceled),
            _ => None,
        }
    }

    /// Closed and canceled visits accept no further transitions.
    pub fn is_terminal(self) -> bool {
        !matches!(self, TreatmentStatus::Active)
    }

    pub fn can_transition_to(self, next: TreatmentStatus) -> bool {
        matches!(
            (self, next),
            (TreatmentStatus::Active, TreatmentStatus::Closed)
                | (TreatmentStatus::Active, TreatmentStatus::Canceled)
        )
    }
}

/// Doctor's notes for a visit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Diagnosis {
    #[serde(rename = "CHIEF_COMPLAINT")]
    pub chief_complaint: Option<String>,
    #[serde(rename = "PRESENT_ILL")]
    pub present_illness: Option<String>,
    #[serde(rename = "PHYSICAL_EXAM")]
    pub physical_exam: Option<String>,
    #[serde(rename = "PLAN1")]
    pub plan: Option<String>,
}

/// Strict, null-safe treatment record sent to the backend.
///
/// Every optional attribute is always present in the serialized form,
/// as `null` when unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Treatment {
    #[serde(rename = "VNO")]
    pub vno: Option<String>,
    #[serde(rename = "HNNO")]
    pub hnno: Option<String>,
    /// Visit date (Gregorian `YYYY-MM-DD`)
    #[serde(rename = "RDATE")]
    pub visit_date: Option<String>,
    #[serde(rename = "TRDATE")]
    pub treatment_date: Option<String>,
    #[serde(flatten)]
    pub vitals: VitalSigns,
    #[serde(rename = "DXCODE")]
    pub dx_code: Option<String>,
    #[serde(rename = "ICD10CODE")]
    pub icd10_code: Option<String>,
    /// Free-text treatment/diagnosis note
    #[serde(rename = "TREATMENT1")]
    pub treatment_note: Option<String>,
    #[serde(rename = "INVESTIGATION_NOTE")]
    pub investigation_note: Option<String>,
    /// Attending doctor's employee code
    #[serde(rename = "EMP_CODE")]
    pub doctor_code: Option<String>,
    #[serde(rename = "STATUS1")]
    pub status: TreatmentStatus,
    #[serde(rename = "APPOINTMENT_DATE")]
    pub appointment_date: Option<String>,
    #[serde(rename = "APPOINTMENT_TDATE")]
    pub appointment_tdate: Option<String>,
    #[serde(rename = "TOTAL_AMOUNT")]
    pub total_amount: Option<f64>,
    #[serde(rename = "DISCOUNT_AMOUNT")]
    pub discount_amount: Option<f64>,
    #[serde(rename = "NET_AMOUNT")]
    pub net_amount: Option<f64>,
    #[serde(rename = "PAYMENT_STATUS")]
    pub payment_status: Option<String>,
    #[serde(rename = "PAYMENT_DATE")]
    pub payment_date: Option<String>,
    #[serde(rename = "PAYMENT_TIME")]
    pub payment_time: Option<String>,
    #[serde(rename = "PAYMENT_METHOD")]
    pub payment_method: Option<String>,
    #[serde(rename = "RECEIVED_AMOUNT")]
    pub received_amount: Option<f64>,
    #[serde(rename = "CHANGE_AMOUNT")]
    pub change_amount: Option<f64>,
    #[serde(rename = "CASHIER")]
    pub cashier: Option<String>,
    pub drugs: Vec<Value>,
    pub procedures: Vec<Value>,
    #[serde(rename = "labTests")]
    pub lab_tests: Vec<Value>,
    #[serde(rename = "radioTests")]
    pub radio_tests: Vec<Value>,
    pub diagnosis: Option<Diagnosis>,
}

impl Treatment {
    /// Typed view of the line items of one kind.
    pub fn lines(&self, kind: LineKind) -> Vec<TreatmentLine> {
        let items = match kind {
            LineKind::Drug => &self.drugs,
            LineKind::Procedure => &self.procedures,
            LineKind::LabTest => &self.lab_tests,
            LineKind::RadioTest => &self.radio_tests,
        };
        items
            .iter()
            .filter_map(|item| TreatmentLine::from_value(kind, item))
            .collect()
    }
}

/// Kind of line item attached to a treatment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum LineKind {
    Drug,
    Procedure,
    LabTest,
    RadioTest,
}

impl LineKind {
    /// Keys that may carry the item code, most specific first.
    pub fn code_keys(self) -> &'static [&'static str] {
        match self {
            LineKind::Drug => &["DRUG_CODE"],
            LineKind::Procedure => &["PROCEDURE_CODE", "MEDICAL_PROCEDURE_CODE"],
            LineKind::LabTest => &["LABCODE", "LAB_CODE"],
            LineKind::RadioTest => &["RLCODE", "RADIO_CODE"],
        }
    }

    /// Keys that may carry the display name, most specific first.
    pub fn name_keys(self) -> &'static [&'static str] {
        match self {
            LineKind::Drug => &["DRUG_NAME", "GENERIC_NAME"],
            LineKind::Procedure => &["PROCEDURE_NAME", "MED_PRO_NAME_THAI", "MED_PRO_NAME_ENG"],
            LineKind::LabTest => &["LABNAME", "LAB_NAME"],
            LineKind::RadioTest => &["RLNAME", "RADIO_NAME"],
        }
    }

    /// Backend collection key on a treatment record.
    pub fn collection_key(self) -> &'static str {
        match self {
            LineKind::Drug => keys::DRUGS,
            LineKind::Procedure => keys::PROCEDURES,
            LineKind::LabTest => keys::LAB_TESTS,
            LineKind::RadioTest => keys::RADIO_TESTS,
        }
    }
}

/// Typed view of one treatment line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TreatmentLine {
    pub kind: LineKind,
    pub code: String,
    pub name: Option<String>,
    pub quantity: Option<f64>,
    pub unit_price: Option<f64>,
}

impl TreatmentLine {
    /// Read a line item from its wire object. Items without a code are skipped.
    pub fn from_value(kind: LineKind, value: &Value) -> Option<Self> {
        let Value::Object(map) = value else {
            return None;
        };
        let first_text = |keys: &[&str]| {
            keys.iter()
                .find_map(|k| map.get(*k).and_then(text_from_value))
        };
        let first_number = |keys: &[&str]| {
            keys.iter()
                .find_map(|k| map.get(*k).and_then(number_from_value))
        };

        Some(Self {
            kind,
            code: first_text(kind.code_keys())?,
            name: first_text(kind.name_keys()),
            quantity: first_number(&["QTY", "QUANTITY"][..]),
            unit_price: first_number(&["UNIT_PRICE", "PRICE", "AMT"][..]),
        })
    }
}
