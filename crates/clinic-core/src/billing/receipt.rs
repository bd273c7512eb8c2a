//! Printable receipt projection.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::calendar::format_thai_date_of;
use crate::models::{EditablePrices, Patient, PaymentMethod, PriceLineItem};

use super::currency::baht_text;
use super::payment::PaymentTotals;

const PER_VISIT_UNIT: &str = "ครั้ง";
const DEFAULT_DRUG_UNIT: &str = "หน่วย";
const LAB_LABEL: &str = "รายการตรวจแล็บ";
const PROCEDURE_LABEL: &str = "หัตถการ";
const DRUG_LABEL: &str = "ยา";

/// Receipt handed to the print view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// Unique receipt number (UUID v4)
    pub receipt_no: String,
    /// Clinic header, empty when not configured
    pub clinic_name: String,
    pub patient: ReceiptPatient,
    pub items: Vec<ReceiptLine>,
    pub total_amount: f64,
    pub discount_amount: f64,
    pub net_amount: f64,
    pub received_amount: f64,
    pub change_amount: f64,
    /// Net amount in Thai words
    pub net_amount_text: String,
    pub payment_method: PaymentMethod,
    pub cashier: String,
    /// Thai long date, e.g. `15 มีนาคม 2567`
    pub date: String,
    /// `HH:MM`
    pub time: String,
}

/// Patient block of a receipt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptPatient {
    pub hn: Option<String>,
    pub vno: Option<String>,
    pub full_name: String,
}

/// One printed receipt line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReceiptLine {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    /// Final charge for the line
    pub price: f64,
}

impl ReceiptLine {
    fn per_visit(item: &PriceLineItem, label: &str) -> Self {
        Self {
            name: first_text(&[&item.name, &item.code]).unwrap_or(label).to_string(),
            quantity: 1.0,
            unit: PER_VISIT_UNIT.to_string(),
            price: item.charge(),
        }
    }

    fn drug(item: &PriceLineItem) -> Self {
        Self {
            name: first_text(&[&item.name, &item.generic_name, &item.code])
                .unwrap_or(DRUG_LABEL)
                .to_string(),
            quantity: item.quantity.unwrap_or(1.0),
            unit: first_text(&[&item.unit])
                .unwrap_or(DEFAULT_DRUG_UNIT)
                .to_string(),
            price: item.charge(),
        }
    }
}

fn first_text<'a>(candidates: &[&'a Option<String>]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|c| c.as_deref())
        .map(str::trim)
        .find(|s| !s.is_empty())
}

impl Receipt {
    pub(crate) fn build(
        clinic_name: &str,
        patient: &Patient,
        prices: &EditablePrices,
        totals: PaymentTotals,
        payment_method: PaymentMethod,
        cashier: String,
        local: NaiveDateTime,
    ) -> Self {
        let items = prices
            .labs
            .iter()
            .map(|item| ReceiptLine::per_visit(item, LAB_LABEL))
            .chain(
                prices
                    .procedures
                    .iter()
                    .map(|item| ReceiptLine::per_visit(item, PROCEDURE_LABEL)),
            )
            .chain(prices.drugs.iter().map(ReceiptLine::drug))
            .collect();

        Self {
            receipt_no: uuid::Uuid::new_v4().to_string(),
            clinic_name: clinic_name.to_string(),
            patient: ReceiptPatient {
                hn: patient.hn.clone(),
                vno: patient.vno.clone(),
                full_name: patient.full_name(),
            },
            items,
            total_amount: totals.total,
            discount_amount: totals.discount,
            net_amount: totals.net,
            received_amount: totals.received,
            change_amount: totals.change,
            net_amount_text: baht_text(totals.net),
            payment_method,
            cashier,
            date: format_thai_date_of(local.date()),
            time: local.format("%H:%M").to_string(),
        }
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
