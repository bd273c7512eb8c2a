//! Treatment payload normalizer.
//!
//! Handles:
//! - Key canonicalization (HNCODE→HNNO, HEIGHT→HIGHT1, ...)
//! - Trimming, blank→null and number parsing
//! - Defaults (status, mirrored treatment/appointment dates)

use crate::models::keys::*;
use crate::models::{Diagnosis, RawTreatment, Treatment, TreatmentStatus, VitalSigns};

/// Normalizer for loose treatment records.
#[derive(Debug, Clone)]
pub struct Normalizer {
    /// Alias → canonical key, applied in order
    key_aliases: Vec<(String, String)>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    /// Create a normalizer with the default key aliases.
    pub fn new() -> Self {
        Self {
            key_aliases: Self::default_key_aliases(),
        }
    }

    /// Add a custom key alias. Earlier aliases win when several are present.
    pub fn add_alias(&mut self, alias: &str, canonical: &str) {
        self.key_aliases
            .push((alias.to_string(), canonical.to_string()));
    }

    /// Copy aliased values onto their canonical keys where the canonical key
    /// is absent or blank. Original keys are left in place.
    pub fn canonicalize(&self, raw: &RawTreatment) -> RawTreatment {
        let mut out = raw.clone();
        for (alias, canonical) in &self.key_aliases {
            if out.is_present(canonical) {
                continue;
            }
            if let Some(value) = raw.get(alias) {
                out.set(canonical, value.clone());
            }
        }
        out
    }

    /// Produce the strict, null-safe record.
    pub fn normalize(&self, raw: &RawTreatment) -> Treatment {
        let raw = self.canonicalize(raw);

        let visit_date = raw.text(RDATE);
        let appointment_date = raw.text(APPOINTMENT_DATE);

        let status = match raw.text(STATUS1) {
            None => TreatmentStatus::Active,
            Some(label) => TreatmentStatus::from_label(&label).unwrap_or_else(|| {
                tracing::warn!(status = %label, "unknown treatment status, defaulting to active");
                TreatmentStatus::Active
            }),
        };

        Treatment {
            vno: raw.text(VNO),
            hnno: raw.text(HNNO),
            treatment_date: raw.text(TRDATE).or_else(|| visit_date.clone()),
            visit_date,
            vitals: VitalSigns {
                weight: raw.number(WEIGHT1),
                height: raw.number(HIGHT1),
                temperature: raw.number(BT1),
                systolic: raw.number(BP1),
                diastolic: raw.number(BP2),
                respiratory_rate: raw.number(RR1),
                pulse_rate: raw.number(PR1),
                spo2: raw.number(SPO2),
                chief_complaint: raw.text(SYMPTOM),
            },
            dx_code: raw.text(DXCODE),
            icd10_code: raw.text(ICD10CODE),
            treatment_note: raw.text(TREATMENT1),
            investigation_note: raw.text(INVESTIGATION_NOTE),
            doctor_code: raw.text(EMP_CODE),
            status,
            appointment_tdate: raw.text(APPOINTMENT_TDATE).or_else(|| appointment_date.clone()),
            appointment_date,
            total_amount: raw.number(TOTAL_AMOUNT),
            discount_amount: raw.number(DISCOUNT_AMOUNT),
            net_amount: raw.number(NET_AMOUNT),
            payment_status: raw.text(PAYMENT_STATUS),
            payment_date: raw.text(PAYMENT_DATE),
            payment_time: raw.text(PAYMENT_TIME),
            payment_method: raw.text(PAYMENT_METHOD),
            received_amount: raw.number(RECEIVED_AMOUNT),
            change_amount: raw.number(CHANGE_AMOUNT),
            cashier: raw.text(CASHIER),
            drugs: raw.array(DRUGS),
            procedures: raw.array(PROCEDURES),
            lab_tests: raw.array(LAB_TESTS),
            radio_tests: raw.array(RADIO_TESTS),
            diagnosis: raw.object(DIAGNOSIS).map(|dx| Diagnosis {
                chief_complaint: dx.text(CHIEF_COMPLAINT),
                present_illness: dx.text(PRESENT_ILL),
                physical_exam: dx.text(PHYSICAL_EXAM),
                plan: dx.text(PLAN1),
            }),
        }
    }

    /// Default key aliases seen across the clinic's screens.
    fn default_key_aliases() -> Vec<(String, String)> {
        [
            ("VN", VNO),
            ("HNCODE", HNNO),
            ("HN", HNNO),
            ("DOCTOR_CODE", EMP_CODE),
            ("WEIGHT", WEIGHT1),
            ("HEIGHT1", HIGHT1),
            ("HEIGHT", HIGHT1),
            ("TEMPERATURE", BT1),
            ("PULSE", PR1),
            ("RESPIRATORY_RATE", RR1),
            ("STATUS", STATUS1),
            ("labs", LAB_TESTS),
            ("radiologyTests", RADIO_TESTS),
        ]
        .iter()
        .map(|(alias, canonical)| (alias.to_string(), canonical.to_string()))
        .collect()
    }
}

/// Normalize a loose record with the default normalizer.
pub fn format_treatment_data(raw: &RawTreatment) -> Treatment {
    Normalizer::new().normalize(raw)
}
