//! Payment and receipt integration tests.

use anyhow::Result;
use chrono::{TimeZone, Utc};
use clinic_core::billing::{
    calculate_total_from_editable_prices, create_payment_data_from_editable_prices,
    create_receipt_data, format_baht_with_symbol, Billing,
};
use clinic_core::config::ClinicConfig;
use clinic_core::models::{EditablePrices, Patient, PaymentInfo, PaymentMethod, PaymentStatus};

const PRICES_JSON: &str = r#"{
    "labs": [{ "LABCODE": "L01", "LABNAME": "CBC", "PRICE": 150, "editablePrice": 150 }],
    "procedures": [{ "PROCEDURE_CODE": "P01", "PROCEDURE_NAME": "ทำแผล", "PRICE": 250, "editablePrice": "200" }],
    "drugs": [{ "DRUG_CODE": "D01", "GENERIC_NAME": "Paracetamol", "QTY": 10, "UNIT_NAME": "เม็ด", "editablePrice": 50 }]
}"#;

fn make_prices() -> Result<EditablePrices> {
    Ok(serde_json::from_str(PRICES_JSON)?)
}

#[test]
fn test_totals_from_backend_shaped_prices() -> Result<()> {
    let prices = make_prices()?;
    assert_eq!(calculate_total_from_editable_prices(&prices), 400.0);
    assert!(prices.procedures[0].is_overridden());
    Ok(())
}

#[test]
fn test_payment_record_for_cash_visit() -> Result<()> {
    let info: PaymentInfo = serde_json::from_str(r#"{ "discount": "50", "receivedAmount": 400 }"#)?;
    let record = create_payment_data_from_editable_prices(&make_prices()?, &info);

    assert_eq!(record.total_amount, 400.0);
    assert_eq!(record.net_amount, 350.0);
    assert_eq!(record.change_amount, 50.0);
    assert_eq!(record.payment_status, PaymentStatus::Paid);
    assert_eq!(record.payment_method, PaymentMethod::Cash);
    assert_eq!(record.payment_date.len(), 10);
    assert_eq!(record.payment_time.len(), 8);
    assert!(!record.is_underpaid());
    Ok(())
}

#[test]
fn test_underpayment_is_flagged_not_negative() -> Result<()> {
    let info = PaymentInfo {
        discount: Some(50.0),
        received_amount: Some(100.0),
        ..PaymentInfo::default()
    };
    let record = create_payment_data_from_editable_prices(&make_prices()?, &info);

    assert_eq!(record.change_amount, 0.0);
    assert!(record.is_underpaid());
    assert_eq!(record.outstanding(), 250.0);
    Ok(())
}

#[test]
fn test_configured_defaults_flow_into_payment() -> Result<()> {
    let config = ClinicConfig::from_json_str(
        r#"{ "clinic_name": "คลินิกหมอใจดี", "default_cashier": "EMP07", "default_payment_method": "โอนเงิน" }"#,
    )?;
    let billing = Billing::new(&config);
    let now = Utc.with_ymd_and_hms(2024, 12, 31, 18, 0, 0).unwrap();

    let record = billing.create_payment_at(&make_prices()?, &PaymentInfo::default(), now);
    assert_eq!(record.cashier, "EMP07");
    assert_eq!(record.payment_method, PaymentMethod::Transfer);
    assert_eq!(record.payment_date, "2025-01-01");
    assert_eq!(record.payment_time, "01:00:00");
    Ok(())
}

#[test]
fn test_receipt_for_print_view() -> Result<()> {
    let patient: Patient = serde_json::from_str(
        r#"{ "HNCODE": "HN000123", "VNO": "VN670315001", "PRENAME": "นาง", "NAME1": "สมศรี", "SURNAME": "มีสุข" }"#,
    )?;
    let info = PaymentInfo {
        received_amount: Some(500.0),
        ..PaymentInfo::default()
    };
    let receipt = create_receipt_data(&patient, &make_prices()?, &info);

    assert_eq!(receipt.patient.full_name, "นางสมศรี มีสุข");
    assert_eq!(receipt.patient.vno.as_deref(), Some("VN670315001"));
    assert_eq!(receipt.items.len(), 3);
    assert_eq!(receipt.items[0].name, "CBC");
    assert_eq!(receipt.items[1].price, 200.0);
    assert_eq!(receipt.items[2].name, "Paracetamol");
    assert_eq!(receipt.items[2].unit, "เม็ด");
    assert_eq!(receipt.change_amount, 100.0);
    assert_eq!(format_baht_with_symbol(receipt.net_amount), "฿400.00");

    let json = receipt.to_json()?;
    let value: serde_json::Value = serde_json::from_str(&json)?;
    assert_eq!(value["items"][0]["unit"], "ครั้ง");
    assert_eq!(value["netAmountText"], "สี่ร้อยบาทถ้วน");
    Ok(())
}

#[test]
fn test_reference_bill_totals() -> Result<()> {
    let prices: EditablePrices = serde_json::from_str(
        r#"{
            "labs": [{ "editablePrice": 100 }],
            "procedures": [{ "editablePrice": 250 }],
            "drugs": [{ "editablePrice": 30 }, { "editablePrice": 20 }]
        }"#,
    )?;
    assert_eq!(calculate_total_from_editable_prices(&prices), 400.0);

    let paid = PaymentInfo {
        discount: Some(50.0),
        received_amount: Some(400.0),
        ..PaymentInfo::default()
    };
    let record = create_payment_data_from_editable_prices(&prices, &paid);
    assert_eq!(record.net_amount, 350.0);
    assert_eq!(record.change_amount, 50.0);

    let short = PaymentInfo {
        received_amount: Some(100.0),
        ..paid
    };
    let record = create_payment_data_from_editable_prices(&prices, &short);
    assert_eq!(record.change_amount, 0.0);
    Ok(())
}

#[test]
fn test_rows_carrying_both_backend_keys() -> Result<()> {
    let prices: EditablePrices = serde_json::from_str(
        r#"{
            "procedures": [{ "PROCEDURE_CODE": "P02", "PROCEDURE_NAME": "ฉีดยา", "MED_PRO_NAME_THAI": "ฉีดยาเข้ากล้าม", "PRICE": 80, "UNIT_PRICE": 80, "editablePrice": 80 }],
            "drugs": [{ "DRUG_CODE": "D02", "DRUG_NAME": "Amoxicillin 500", "UNIT_CODE": "CAP", "UNIT_NAME": "แคปซูล", "QTY": "21", "editablePrice": 105 }]
        }"#,
    )?;
    assert_eq!(prices.procedures[0].name.as_deref(), Some("ฉีดยา"));
    assert_eq!(prices.drugs[0].unit.as_deref(), Some("แคปซูล"));
    assert_eq!(calculate_total_from_editable_prices(&prices), 185.0);

    let receipt = create_receipt_data(&Patient::new("HN1", "ก", "ข"), &prices, &PaymentInfo::default());
    assert_eq!(receipt.items[1].name, "Amoxicillin 500");
    assert_eq!(receipt.items[1].quantity, 21.0);
    Ok(())
}

#[test]
fn test_blank_or_unknown_method_uses_configured_default() -> Result<()> {
    let config = ClinicConfig {
        default_payment_method: PaymentMethod::CreditCard,
        ..ClinicConfig::default()
    };
    let billing = Billing::new(&config);

    for raw in [r#"{ "paymentMethod": "" }"#, r#"{ "paymentMethod": "qr" }"#] {
        let info: PaymentInfo = serde_json::from_str(raw)?;
        let record = billing.create_payment(&make_prices()?, &info);
        assert_eq!(record.payment_method, PaymentMethod::CreditCard);
    }
    Ok(())
}
