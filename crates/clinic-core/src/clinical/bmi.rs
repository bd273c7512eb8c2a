//! Body mass index.

use crate::models::{BmiCategory, BmiResult, VitalSigns};

/// Compute BMI from weight (kg) and height (cm).
///
/// Returns `None` when either input is missing, zero or negative. The value
/// is rounded to one decimal and the category is taken from the rounded
/// value, so the displayed number and label always agree. Boundaries belong
/// to the upper category (18.5 is normal, 25.0 overweight, 30.0 obese).
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> Option<BmiResult> {
    if !(weight_kg > 0.0) || !(height_cm > 0.0) {
        return None;
    }

    let height_m = height_cm / 100.0;
    let raw = weight_kg / (height_m * height_m);
    if !raw.is_finite() {
        return None;
    }

    let value = (raw * 10.0).round() / 10.0;
    Some(BmiResult {
        value,
        category: classify_bmi(value),
    })
}

/// Category for a BMI value.
pub fn classify_bmi(value: f64) -> BmiCategory {
    if value < 18.5 {
        BmiCategory::Underweight
    } else if value < 25.0 {
        BmiCategory::Normal
    } else if value < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

impl VitalSigns {
    /// BMI from this record's weight and height, if both are present.
    pub fn bmi(&self) -> Option<BmiResult> {
        calculate_bmi(self.weight?, self.height?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_example() {
        let bmi = calculate_bmi(68.5, 170.0).unwrap();
        assert_eq!(bmi.value, 23.7);
        assert_eq!(bmi.category, BmiCategory::Normal);
        assert_eq!(bmi.category.label(), "ปกติ");
    }

    #[test]
    fn test_underweight_example() {
        let bmi = calculate_bmi(45.0, 170.0).unwrap();
        assert_eq!(bmi.value, 15.6);
        assert_eq!(bmi.category.label(), "ผอม");
    }

    #[test]
    fn test_boundaries_go_up() {
        assert_eq!(calculate_bmi(74.0, 200.0).unwrap().category, BmiCategory::Normal);
        assert_eq!(calculate_bmi(100.0, 200.0).unwrap().category, BmiCategory::Overweight);
        assert_eq!(calculate_bmi(120.0, 200.0).unwrap().category, BmiCategory::Obese);
    }

    #[test]
    fn test_missing_or_zero_inputs() {
        assert!(calculate_bmi(0.0, 170.0).is_none());
        assert!(calculate_bmi(70.0, 0.0).is_none());
        assert!(calculate_bmi(70.0, -170.0).is_none());
        assert!(calculate_bmi(f64::NAN, 170.0).is_none());
    }

    #[test]
    fn test_vitals_bmi() {
        let vitals = VitalSigns {
            weight: Some(90.0),
            height: Some(175.0),
            ..VitalSigns::default()
        };
        let bmi = vitals.bmi().unwrap();
        assert_eq!(bmi.value, 29.4);
        assert_eq!(bmi.category, BmiCategory::Overweight);

        assert!(VitalSigns::default().bmi().is_none());
    }
}
