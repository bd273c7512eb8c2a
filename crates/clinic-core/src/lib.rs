//! Clinic Core Library
//!
//! Visit-level rules for a Thai outpatient clinic: visit numbers, Buddhist-era
//! dates, vital-sign checks, treatment payload validation and normalization,
//! and payment/receipt derivation.
//!
//! # Architecture
//!
//! ```text
//! Patient search → Visit registration (VN) → Vital signs intake
//!                                                   │
//!                                       check_vitals / calculate_bmi
//!                                                   │
//!                                  Doctor enters treatment (raw payload)
//!                                                   │
//!                             ┌─────────────────────▼─────────────────────┐
//!                             │        TreatmentValidator::validate       │
//!                             │        Normalizer::normalize → Treatment  │
//!                             └─────────────────────┬─────────────────────┘
//!                                                   │
//!                                        Cashier edits line prices
//!                                                   │
//!                             ┌─────────────────────┼─────────────────────┐
//!                             │                                           │
//!                             ▼                                           ▼
//!                      PaymentRecord                                  Receipt
//!                   (backend update)                               (print view)
//! ```
//!
//! # Modules
//!
//! - [`identifiers`]: VN generation, validation and parsing
//! - [`calendar`]: Thailand civil time, Buddhist era, Thai date formatting
//! - [`clinical`]: vital-sign checks and BMI
//! - [`treatment`]: payload validation, normalization and line reconciliation
//! - [`billing`]: totals, payment record, receipt, baht formatting
//! - [`models`]: domain types and the loose wire record
//! - [`config`]: clinic configuration

pub mod billing;
pub mod calendar;
pub mod clinical;
pub mod config;
pub mod error;
pub mod identifiers;
pub mod models;
pub mod treatment;

// Re-export commonly used types
pub use billing::{Billing, PaymentTotals, Receipt, ReceiptLine};
pub use calendar::ThaiDate;
pub use clinical::VitalWarning;
pub use config::{ClinicConfig, ValidationLimits, ValueRange};
pub use error::{ClinicError, ClinicResult};
pub use identifiers::{VisitNumber, VnComponents};
pub use models::{
    BmiCategory, BmiResult, EditablePrices, Patient, PaymentInfo, PaymentMethod, PaymentRecord,
    PaymentStatus, PriceLineItem, RawTreatment, Treatment, TreatmentStatus, VitalSigns,
};
pub use treatment::{Normalizer, TreatmentValidator, ValidationIssue};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::Arc;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum ClinicCoreError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<ClinicError> for ClinicCoreError {
    fn from(e: ClinicError) -> Self {
        match e {
            ClinicError::InvalidInput(msg) => ClinicCoreError::InvalidInput(msg),
            ClinicError::InvalidConfig(msg) => ClinicCoreError::InvalidConfig(msg),
            ClinicError::Serialization(e) => ClinicCoreError::SerializationError(e.to_string()),
            ClinicError::Io(e) => ClinicCoreError::InvalidConfig(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for ClinicCoreError {
    fn from(e: serde_json::Error) -> Self {
        ClinicCoreError::SerializationError(e.to_string())
    }
}

// =========================================================================
// Free Functions (exported to FFI)
// =========================================================================

/// Propose a VN for a visit starting now.
#[uniffi::export]
pub fn generate_vno() -> String {
    identifiers::generate_vno_now()
}

/// Check a VN against the `VN` + 9 digits grammar.
#[uniffi::export]
pub fn is_valid_vno(vno: String) -> bool {
    identifiers::is_valid_vno(&vno)
}

/// Recover the visit date and running number from a VN.
#[uniffi::export]
pub fn extract_date_from_vno(vno: String) -> Option<FfiVnComponents> {
    identifiers::extract_date_from_vno(&vno).map(|c| c.into())
}

/// BMI from weight (kg) and height (cm).
#[uniffi::export]
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> Option<FfiBmi> {
    clinical::calculate_bmi(weight_kg, height_cm).map(|b| b.into())
}

/// Thai warnings for abnormal readings.
#[uniffi::export]
pub fn check_abnormal_vitals(vitals: FfiVitalSigns) -> Vec<String> {
    clinical::check_abnormal_vitals(&vitals.into())
}

/// Thai long date; the input is returned unchanged when it cannot be parsed.
#[uniffi::export]
pub fn format_thai_date(input: String) -> String {
    calendar::format_thai_date(&input).into_string()
}

/// Gregorian `YYYY-MM-DD` to Buddhist `YYYY-MM-DD`.
#[uniffi::export]
pub fn to_buddhist_date_string(gregorian: String) -> Option<String> {
    calendar::to_buddhist_date_string(&gregorian)
}

/// Normalize a raw treatment payload into the backend shape.
#[uniffi::export]
pub fn format_treatment_json(payload_json: String) -> Result<String, ClinicCoreError> {
    let raw = RawTreatment::from_json(&payload_json)?;
    let treatment = treatment::format_treatment_data(&raw);
    Ok(serde_json::to_string(&treatment)?)
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Create a clinic handle from a JSON configuration.
#[uniffi::export]
pub fn open_clinic(config_json: String) -> Result<Arc<ClinicCore>, ClinicCoreError> {
    let config = ClinicConfig::from_json_str(&config_json)?;
    Ok(Arc::new(ClinicCore { config }))
}

/// Create a clinic handle with the default configuration.
#[uniffi::export]
pub fn open_default_clinic() -> Arc<ClinicCore> {
    Arc::new(ClinicCore {
        config: ClinicConfig::default(),
    })
}

// =========================================================================
// Main API Object
// =========================================================================

/// Configured clinic handle for FFI.
#[derive(uniffi::Object)]
pub struct ClinicCore {
    config: ClinicConfig,
}

#[uniffi::export]
impl ClinicCore {
    /// Configured clinic name.
    pub fn clinic_name(&self) -> String {
        self.config.clinic_name.clone()
    }

    /// Validate a raw treatment payload; empty when valid.
    pub fn validate_treatment_json(&self, payload_json: String) -> Result<Vec<String>, ClinicCoreError> {
        let raw = RawTreatment::from_json(&payload_json)?;
        let validator = TreatmentValidator::new(&self.config);
        Ok(validator
            .validate(&raw)
            .iter()
            .map(|issue| issue.to_string())
            .collect())
    }

    /// Payment record JSON from editable prices and cashier input.
    pub fn create_payment_json(
        &self,
        prices_json: String,
        info_json: String,
    ) -> Result<String, ClinicCoreError> {
        let prices: EditablePrices = serde_json::from_str(&prices_json)?;
        let info: PaymentInfo = serde_json::from_str(&info_json)?;
        let record = Billing::new(&self.config).create_payment(&prices, &info);
        Ok(serde_json::to_string(&record)?)
    }

    /// Receipt JSON for the print view.
    pub fn create_receipt_json(
        &self,
        patient_json: String,
        prices_json: String,
        info_json: String,
    ) -> Result<String, ClinicCoreError> {
        let patient: Patient = serde_json::from_str(&patient_json)?;
        let prices: EditablePrices = serde_json::from_str(&prices_json)?;
        let info: PaymentInfo = serde_json::from_str(&info_json)?;
        let receipt = Billing::new(&self.config).create_receipt(&patient, &prices, &info);
        Ok(receipt.to_json()?)
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe VN components.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiVnComponents {
    pub buddhist_year: i32,
    pub christian_year: i32,
    pub month: u32,
    pub day: u32,
    pub running_number: u32,
    pub date_string: String,
    pub buddhist_date_string: String,
}

impl From<VnComponents> for FfiVnComponents {
    fn from(c: VnComponents) -> Self {
        Self {
            buddhist_year: c.buddhist_year,
            christian_year: c.christian_year,
            month: c.month,
            day: c.day,
            running_number: c.running_number,
            date_string: c.date_string,
            buddhist_date_string: c.buddhist_date_string,
        }
    }
}

/// FFI-safe BMI result.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiBmi {
    pub value: f64,
    /// Thai category label
    pub category: String,
}

impl From<BmiResult> for FfiBmi {
    fn from(bmi: BmiResult) -> Self {
        Self {
            value: bmi.value,
            category: bmi.category.label().to_string(),
        }
    }
}

/// FFI-safe vital signs.
#[derive(Debug, Clone, Default, uniffi::Record)]
pub struct FfiVitalSigns {
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub temperature: Option<f64>,
    pub systolic: Option<f64>,
    pub diastolic: Option<f64>,
    pub respiratory_rate: Option<f64>,
    pub pulse_rate: Option<f64>,
    pub spo2: Option<f64>,
}

impl From<FfiVitalSigns> for VitalSigns {
    fn from(v: FfiVitalSigns) -> Self {
        VitalSigns {
            weight: v.weight,
            height: v.height,
            temperature: v.temperature,
            systolic: v.systolic,
            diastolic: v.diastolic,
            respiratory_rate: v.respiratory_rate,
            pulse_rate: v.pulse_rate,
            spo2: v.spo2,
            chief_complaint: None,
        }
    }
}
