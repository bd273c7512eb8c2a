//! Patient identity as shown on receipts and visit screens.

use serde::{Deserialize, Serialize};

use super::loose::deserialize_loose_text;

/// The slice of a patient record the billing layer needs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Hospital number
    #[serde(rename = "HNCODE", alias = "HNNO", default, deserialize_with = "deserialize_loose_text")]
    pub hn: Option<String>,
    /// Current visit number, when the patient is in the queue
    #[serde(rename = "VNO", default, deserialize_with = "deserialize_loose_text")]
    pub vno: Option<String>,
    /// Title (นาย, นาง, นางสาว, ...)
    #[serde(rename = "PRENAME", default, deserialize_with = "deserialize_loose_text")]
    pub prename: Option<String>,
    #[serde(rename = "NAME1", default, deserialize_with = "deserialize_loose_text")]
    pub first_name: Option<String>,
    #[serde(rename = "SURNAME", default, deserialize_with = "deserialize_loose_text")]
    pub surname: Option<String>,
    /// Birth date (Gregorian `YYYY-MM-DD`)
    #[serde(rename = "BDATE", default, deserialize_with = "deserialize_loose_text")]
    pub birth_date: Option<String>,
    #[serde(rename = "TEL1", default, deserialize_with = "deserialize_loose_text")]
    pub phone: Option<String>,
}

impl Patient {
    pub fn new(hn: &str, first_name: &str, surname: &str) -> Self {
        Self {
            hn: Some(hn.to_string()),
            first_name: Some(first_name.to_string()),
            surname: Some(surname.to_string()),
            ..Self::default()
        }
    }

    /// Title, first name and surname joined; title is attached without a space.
    pub fn full_name(&self) -> String {
        let given = format!(
            "{}{}",
            self.prename.as_deref().unwrap_or(""),
            self.first_name.as_deref().unwrap_or("")
        );
        [given.as_str(), self.surname.as_deref().unwrap_or("")]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let mut patient = Patient::new("HN000123", "สมชาย", "ใจดี");
        assert_eq!(patient.full_name(), "สมชาย ใจดี");

        patient.prename = Some("นาย".into());
        assert_eq!(patient.full_name(), "นายสมชาย ใจดี");

        patient.surname = None;
        assert_eq!(patient.full_name(), "นายสมชาย");
    }

    #[test]
    fn test_hn_alias() {
        let patient: Patient = serde_json::from_str(r#"{"HNNO": "HN9", "NAME1": "A"}"#).unwrap();
        assert_eq!(patient.hn.as_deref(), Some("HN9"));
        assert!(patient.vno.is_none());
    }
}
