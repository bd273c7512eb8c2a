//! Clinic configuration.
//!
//! Resolved once at startup and passed by reference into the stateless
//! services ([`crate::billing::Billing`], [`crate::treatment::TreatmentValidator`]).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ClinicError, ClinicResult};
use crate::models::PaymentMethod;

/// Cashier recorded when the caller does not supply one.
pub const DEFAULT_CASHIER: &str = "SYSTEM";

/// Inclusive numeric range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Check whether `value` lies within the range (bounds included).
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Hard validation limits applied to treatment payloads before submission.
///
/// These are distinct from the clinical warning ranges in
/// [`crate::clinical::vitals`]: weight and height are bounded by what can
/// physically be entered, the remaining fields by the reference table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationLimits {
    pub weight_kg: ValueRange,
    pub height_cm: ValueRange,
    pub temperature_c: ValueRange,
    pub systolic_mmhg: ValueRange,
    pub diastolic_mmhg: ValueRange,
    pub pulse_bpm: ValueRange,
    pub spo2_percent: ValueRange,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            weight_kg: ValueRange::new(0.0, 1000.0),
            height_cm: ValueRange::new(0.0, 300.0),
            temperature_c: ValueRange::new(36.0, 37.5),
            systolic_mmhg: ValueRange::new(90.0, 140.0),
            diastolic_mmhg: ValueRange::new(60.0, 100.0),
            pulse_bpm: ValueRange::new(60.0, 100.0),
            spo2_percent: ValueRange::new(95.0, 100.0),
        }
    }
}

impl ValidationLimits {
    fn ranges(&self) -> [(&'static str, &ValueRange); 7] {
        [
            ("weight_kg", &self.weight_kg),
            ("height_cm", &self.height_cm),
            ("temperature_c", &self.temperature_c),
            ("systolic_mmhg", &self.systolic_mmhg),
            ("diastolic_mmhg", &self.diastolic_mmhg),
            ("pulse_bpm", &self.pulse_bpm),
            ("spo2_percent", &self.spo2_percent),
        ]
    }
}

/// Clinic-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClinicConfig {
    /// Name printed at the top of receipts
    pub clinic_name: String,
    /// Cashier identifier used when a payment does not name one
    pub default_cashier: String,
    /// Payment method used when a payment does not name one
    pub default_payment_method: PaymentMethod,
    /// Hard limits for treatment validation
    pub validation_limits: ValidationLimits,
}

impl Default for ClinicConfig {
    fn default() -> Self {
        Self {
            clinic_name: String::new(),
            default_cashier: DEFAULT_CASHIER.to_string(),
            default_payment_method: PaymentMethod::Cash,
            validation_limits: ValidationLimits::default(),
        }
    }
}

impl ClinicConfig {
    /// Create a validated configuration.
    pub fn new(
        clinic_name: String,
        default_cashier: String,
        default_payment_method: PaymentMethod,
        validation_limits: ValidationLimits,
    ) -> ClinicResult<Self> {
        let config = Self {
            clinic_name,
            default_cashier,
            default_payment_method,
            validation_limits,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a configuration from JSON. Missing keys take defaults.
    pub fn from_json_str(json: &str) -> ClinicResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> ClinicResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;
        tracing::debug!(path = %path.display(), "loaded clinic configuration");
        Ok(config)
    }

    fn validate(&self) -> ClinicResult<()> {
        if self.default_cashier.trim().is_empty() {
            return Err(ClinicError::InvalidConfig(
                "default_cashier cannot be empty".into(),
            ));
        }

        for (name, range) in self.validation_limits.ranges() {
            if !range.min.is_finite() || !range.max.is_finite() || range.min > range.max {
                return Err(ClinicError::InvalidConfig(format!(
                    "validation range {} is invalid ({} - {})",
                    name, range.min, range.max
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ClinicConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_cashier, "SYSTEM");
        assert_eq!(config.default_payment_method, PaymentMethod::Cash);
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config = ClinicConfig::from_json_str(r#"{"clinic_name": "คลินิกหมอดี"}"#).unwrap();
        assert_eq!(config.clinic_name, "คลินิกหมอดี");
        assert_eq!(config.default_cashier, "SYSTEM");
        assert_eq!(config.validation_limits.height_cm.max, 300.0);
    }

    #[test]
    fn test_empty_cashier_rejected() {
        let result = ClinicConfig::from_json_str(r#"{"default_cashier": "  "}"#);
        assert!(matches!(result, Err(ClinicError::InvalidConfig(_))));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let mut limits = ValidationLimits::default();
        limits.pulse_bpm = ValueRange::new(100.0, 60.0);
        let result = ClinicConfig::new(
            String::new(),
            "cashier-1".into(),
            PaymentMethod::Transfer,
            limits,
        );
        assert!(matches!(result, Err(ClinicError::InvalidConfig(_))));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clinic.json");
        std::fs::write(&path, r#"{"default_cashier": "EMP001"}"#).unwrap();

        let config = ClinicConfig::from_path(&path).unwrap();
        assert_eq!(config.default_cashier, "EMP001");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = ClinicConfig::from_path("/nonexistent/clinic.json");
        assert!(matches!(result, Err(ClinicError::Io(_))));
    }

    #[test]
    fn test_range_contains_bounds() {
        let range = ValueRange::new(36.0, 37.5);
        assert!(range.contains(36.0));
        assert!(range.contains(37.5));
        assert!(!range.contains(37.6));
    }
}
