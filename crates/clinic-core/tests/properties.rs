//! Property tests for the VN codec and BMI.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use clinic_core::calendar::to_thailand_time;
use clinic_core::clinical::calculate_bmi;
use clinic_core::identifiers::{extract_date_from_vno, generate_vno, generate_vno_with_sequence, is_valid_vno};
use proptest::prelude::*;

/// 1957-01-01 to 2056-12-31 UTC: B.E. 2500 to 2599, the span a two-digit VN year covers.
fn instants() -> impl Strategy<Value = DateTime<Utc>> {
    let start = Utc.with_ymd_and_hms(1957, 1, 1, 0, 0, 0).unwrap().timestamp();
    let end = Utc.with_ymd_and_hms(2056, 12, 31, 16, 59, 59).unwrap().timestamp();
    (start..=end).prop_map(|secs| Utc.timestamp_opt(secs, 0).unwrap())
}

proptest! {
    #[test]
    fn vn_round_trips_date_and_sequence(now in instants(), sequence in 1u16..=999) {
        let vno = generate_vno_with_sequence(now, sequence);
        let parts = extract_date_from_vno(&vno).expect("generated VN must parse");
        let local = to_thailand_time(now);

        prop_assert_eq!(parts.christian_year, local.year());
        prop_assert_eq!(parts.buddhist_year, local.year() + 543);
        prop_assert_eq!(parts.month, local.month());
        prop_assert_eq!(parts.day, local.day());
        prop_assert_eq!(parts.running_number, u32::from(sequence));
    }

    #[test]
    fn generated_vn_matches_grammar(now in instants()) {
        let vno = generate_vno(now);
        prop_assert!(is_valid_vno(&vno));
        prop_assert_eq!(vno.len(), 11);
        prop_assert!(vno.starts_with("VN"));
        prop_assert!(vno[2..].bytes().all(|b| b.is_ascii_digit()));
    }

    #[test]
    fn arbitrary_text_parses_only_when_valid(text in "\\PC{0,14}") {
        prop_assert_eq!(extract_date_from_vno(&text).is_some(), is_valid_vno(&text));
    }

    #[test]
    fn bmi_grows_with_weight(
        weight in 1.0f64..300.0,
        gap in 1.0f64..50.0,
        height in 100.0f64..250.0,
    ) {
        let lighter = calculate_bmi(weight, height).expect("positive inputs");
        let heavier = calculate_bmi(weight + gap, height).expect("positive inputs");
        prop_assert!(heavier.value > lighter.value);
        prop_assert!(heavier.category >= lighter.category);
    }
}
