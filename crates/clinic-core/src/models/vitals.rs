//! Vital-sign models.

use serde::{Deserialize, Serialize};

use super::loose::{deserialize_loose_f64, deserialize_loose_text};

/// Intake vital signs for one visit.
///
/// Every reading is optional; absent readings serialize as `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VitalSigns {
    /// Body weight in kg
    #[serde(rename = "WEIGHT1", default, deserialize_with = "deserialize_loose_f64")]
    pub weight: Option<f64>,
    /// Height in cm
    #[serde(rename = "HIGHT1", default, deserialize_with = "deserialize_loose_f64")]
    pub height: Option<f64>,
    /// Body temperature in °C
    #[serde(rename = "BT1", default, deserialize_with = "deserialize_loose_f64")]
    pub temperature: Option<f64>,
    /// Systolic blood pressure in mmHg
    #[serde(rename = "BP1", default, deserialize_with = "deserialize_loose_f64")]
    pub systolic: Option<f64>,
    /// Diastolic blood pressure in mmHg
    #[serde(rename = "BP2", default, deserialize_with = "deserialize_loose_f64")]
    pub diastolic: Option<f64>,
    /// Respiratory rate in breaths/min
    #[serde(rename = "RR1", default, deserialize_with = "deserialize_loose_f64")]
    pub respiratory_rate: Option<f64>,
    /// Pulse rate in beats/min
    #[serde(rename = "PR1", default, deserialize_with = "deserialize_loose_f64")]
    pub pulse_rate: Option<f64>,
    /// Oxygen saturation in %
    #[serde(rename = "SPO2", default, deserialize_with = "deserialize_loose_f64")]
    pub spo2: Option<f64>,
    /// Free-text chief complaint
    #[serde(rename = "SYMPTOM", default, deserialize_with = "deserialize_loose_text")]
    pub chief_complaint: Option<String>,
}

impl VitalSigns {
    /// Check whether no reading has been entered.
    pub fn is_empty(&self) -> bool {
        self.weight.is_none()
            && self.height.is_none()
            && self.temperature.is_none()
            && self.systolic.is_none()
            && self.diastolic.is_none()
            && self.respiratory_rate.is_none()
            && self.pulse_rate.is_none()
            && self.spo2.is_none()
            && self.chief_complaint.is_none()
    }
}

/// BMI classification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum BmiCategory {
    #[serde(rename = "ผอม")]
    Underweight,
    #[serde(rename = "ปกติ")]
    Normal,
    #[serde(rename = "น้ำหนักเกิน")]
    Overweight,
    #[serde(rename = "อ้วน")]
    Obese,
}

impl BmiCategory {
    /// Thai display label.
    pub fn label(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "ผอม",
            BmiCategory::Normal => "ปกติ",
            BmiCategory::Overweight => "น้ำหนักเกิน",
            BmiCategory::Obese => "อ้วน",
        }
    }
}

/// Body mass index with its category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BmiResult {
    /// BMI rounded to one decimal place
    pub value: f64,
    pub category: BmiCategory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vitals_from_form_strings() {
        let json = r#"{"WEIGHT1": "68.5", "HIGHT1": 170, "BP1": "120", "BP2": "", "SYMPTOM": " ไข้ "}"#;
        let vitals: VitalSigns = serde_json::from_str(json).unwrap();

        assert_eq!(vitals.weight, Some(68.5));
        assert_eq!(vitals.height, Some(170.0));
        assert_eq!(vitals.systolic, Some(120.0));
        assert_eq!(vitals.diastolic, None);
        assert_eq!(vitals.pulse_rate, None);
        assert_eq!(vitals.chief_complaint.as_deref(), Some("ไข้"));
    }

    #[test]
    fn test_absent_readings_serialize_as_null() {
        let json = serde_json::to_value(VitalSigns::default()).unwrap();
        let obj = json.as_object().unwrap();

        assert_eq!(obj.len(), 9);
        assert!(obj.values().all(|v| v.is_null()));
    }

    #[test]
    fn test_bmi_category_labels() {
        assert_eq!(BmiCategory::Normal.label(), "ปกติ");
        assert_eq!(
            serde_json::to_string(&BmiCategory::Underweight).unwrap(),
            "\"ผอม\""
        );
    }
}
