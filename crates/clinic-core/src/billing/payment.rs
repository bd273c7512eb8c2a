//! Payment totals and the payment record sent to the backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::to_thailand_time;
use crate::config::ClinicConfig;
use crate::models::{
    EditablePrices, Patient, PaymentInfo, PaymentMethod, PaymentRecord, PaymentStatus,
};

use super::receipt::Receipt;

/// Amounts derived from a bill and the cashier's input.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct PaymentTotals {
    pub total: f64,
    pub discount: f64,
    pub net: f64,
    pub received: f64,
    pub change: f64,
}

impl PaymentTotals {
    /// Apply the discount and received amount to a bill.
    ///
    /// Net and change are floored at zero. An underpayment therefore shows
    /// as zero change; use [`PaymentTotals::outstanding`] to see the gap.
    pub fn compute(prices: &EditablePrices, info: &PaymentInfo) -> Self {
        let total = calculate_total_from_editable_prices(prices);
        let discount = info.discount.unwrap_or(0.0);
        let net = (total - discount).max(0.0);
        let received = info.received_amount.unwrap_or(0.0);
        let change = (received - net).max(0.0);

        Self {
            total,
            discount,
            net,
            received,
            change,
        }
    }

    /// Amount still owed after the received amount.
    pub fn outstanding(&self) -> f64 {
        (self.net - self.received).max(0.0)
    }
}

/// Sum of the final charge of every lab, procedure and drug line.
///
/// Quantity is ignored: the editable price is the charge for the whole line.
pub fn calculate_total_from_editable_prices(prices: &EditablePrices) -> f64 {
    prices.iter().map(|item| item.charge()).sum()
}

/// Billing service.
///
/// Borrows the clinic configuration for cashier, payment method and
/// receipt header defaults.
pub struct Billing<'a> {
    config: &'a ClinicConfig,
}

impl<'a> Billing<'a> {
    /// Create a new billing service.
    pub fn new(config: &'a ClinicConfig) -> Self {
        Self { config }
    }

    /// Build the payment record, stamped with the current Thailand time.
    pub fn create_payment(&self, prices: &EditablePrices, info: &PaymentInfo) -> PaymentRecord {
        self.create_payment_at(prices, info, Utc::now())
    }

    /// Build the payment record, stamped with the given instant.
    pub fn create_payment_at(
        &self,
        prices: &EditablePrices,
        info: &PaymentInfo,
        now: DateTime<Utc>,
    ) -> PaymentRecord {
        let totals = PaymentTotals::compute(prices, info);
        if totals.outstanding() > 0.0 {
            tracing::warn!(
                net = totals.net,
                received = totals.received,
                outstanding = totals.outstanding(),
                "payment received is less than the net amount"
            );
        }

        let local = to_thailand_time(now);

        PaymentRecord {
            total_amount: totals.total,
            discount_amount: totals.discount,
            net_amount: totals.net,
            payment_status: PaymentStatus::Paid,
            payment_date: local.format("%Y-%m-%d").to_string(),
            payment_time: local.format("%H:%M:%S").to_string(),
            payment_method: self.payment_method(info),
            received_amount: totals.received,
            change_amount: totals.change,
            cashier: self.cashier(info),
        }
    }

    /// Build the printable receipt, stamped with the current Thailand time.
    pub fn create_receipt(
        &self,
        patient: &Patient,
        prices: &EditablePrices,
        info: &PaymentInfo,
    ) -> Receipt {
        self.create_receipt_at(patient, prices, info, Utc::now())
    }

    /// Build the printable receipt, stamped with the given instant.
    pub fn create_receipt_at(
        &self,
        patient: &Patient,
        prices: &EditablePrices,
        info: &PaymentInfo,
        now: DateTime<Utc>,
    ) -> Receipt {
        Receipt::build(
            &self.config.clinic_name,
            patient,
            prices,
            PaymentTotals::compute(prices, info),
            self.payment_method(info),
            self.cashier(info),
            to_thailand_time(now),
        )
    }

    fn payment_method(&self, info: &PaymentInfo) -> PaymentMethod {
        info.payment_method
            .unwrap_or(self.config.default_payment_method)
    }

    fn cashier(&self, info: &PaymentInfo) -> String {
        info.cashier
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(self.config.default_cashier.as_str())
            .to_string()
    }
}

/// Build the payment record with the default configuration.
pub fn create_payment_data_from_editable_prices(
    prices: &EditablePrices,
    info: &PaymentInfo,
) -> PaymentRecord {
    Billing::new(&ClinicConfig::default()).create_payment(prices, info)
}

/// Build the printable receipt with the default configuration.
pub fn create_receipt_data(patient: &Patient, prices: &EditablePrices, info: &PaymentInfo) -> Receipt {
    Billing::new(&ClinicConfig::default()).create_receipt(patient, prices, info)
}
