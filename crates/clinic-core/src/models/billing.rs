//! Billing models: editable price lines, payment input and payment record.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::loose::{
    deserialize_loose_f64, deserialize_loose_text, number_from_value, text_from_value,
};

const CODE_KEYS: &[&str] = &["code", "LABCODE", "PROCEDURE_CODE", "MED_PRO_CODE", "DRUG_CODE"];
const NAME_KEYS: &[&str] = &[
    "name",
    "LABNAME",
    "PROCEDURE_NAME",
    "MED_PRO_NAME_THAI",
    "MED_PRO_NAME_ENG",
    "DRUG_NAME",
];
const GENERIC_NAME_KEYS: &[&str] = &["genericName", "GENERIC_NAME"];
const QUANTITY_KEYS: &[&str] = &["quantity", "QTY", "QUANTITY"];
const UNIT_KEYS: &[&str] = &["unit", "UNIT_NAME", "UNIT_CODE"];
const PRICE_KEYS: &[&str] = &["price", "UNIT_PRICE", "PRICE"];
const EDITABLE_PRICE_KEYS: &[&str] = &["editablePrice"];

/// One billable line (lab test, procedure or drug) while a bill is being built.
///
/// `price` is the reference price from the server; `editable_price` is the
/// final charge for the whole line as set by staff. Rows may use either the
/// camelCase keys or the backend's own column names; when a row carries
/// several keys for one field, the first non-blank one in priority order wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", from = "Value")]
pub struct PriceLineItem {
    /// Structured item code
    pub code: Option<String>,
    /// Clinical or trade name
    pub name: Option<String>,
    /// Generic drug name
    pub generic_name: Option<String>,
    /// Quantity (informational; `editable_price` already covers it)
    pub quantity: Option<f64>,
    /// Dispensing unit
    pub unit: Option<String>,
    /// Server reference price
    pub price: Option<f64>,
    /// Final charge for the line
    pub editable_price: Option<f64>,
}

impl From<Value> for PriceLineItem {
    fn from(value: Value) -> Self {
        let Value::Object(row) = value else {
            return Self::default();
        };
        Self {
            code: first_text(&row, CODE_KEYS),
            name: first_text(&row, NAME_KEYS),
            generic_name: first_text(&row, GENERIC_NAME_KEYS),
            quantity: first_number(&row, QUANTITY_KEYS),
            unit: first_text(&row, UNIT_KEYS),
            price: first_number(&row, PRICE_KEYS),
            editable_price: first_number(&row, EDITABLE_PRICE_KEYS),
        }
    }
}

fn first_text(row: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| row.get(*k).and_then(text_from_value))
}

fn first_number(row: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|k| row.get(*k).and_then(number_from_value))
}

impl PriceLineItem {
    /// Create a line from a reference price, with the editable price seeded from it.
    pub fn priced(name: &str, price: f64) -> Self {
        Self {
            name: Some(name.to_string()),
            price: Some(price),
            editable_price: Some(price),
            ..Self::default()
        }
    }

    /// Charge for this line; a missing override counts as zero.
    pub fn charge(&self) -> f64 {
        self.editable_price.unwrap_or(0.0)
    }

    /// Whether staff changed the charge away from the reference price.
    pub fn is_overridden(&self) -> bool {
        match (self.price, self.editable_price) {
            (Some(reference), Some(charge)) => (reference - charge).abs() > f64::EPSILON,
            _ => false,
        }
    }
}

/// The three billable lists of a visit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EditablePrices {
    pub labs: Vec<PriceLineItem>,
    pub procedures: Vec<PriceLineItem>,
    pub drugs: Vec<PriceLineItem>,
}

impl EditablePrices {
    /// Check whether there is nothing to bill.
    pub fn is_empty(&self) -> bool {
        self.labs.is_empty() && self.procedures.is_empty() && self.drugs.is_empty()
    }

    /// Iterate over every line in lab, procedure, drug order.
    pub fn iter(&self) -> impl Iterator<Item = &PriceLineItem> {
        self.labs
            .iter()
            .chain(self.procedures.iter())
            .chain(self.drugs.iter())
    }
}

/// Payment method.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentMethod {
    #[default]
    #[serde(rename = "เงินสด", alias = "cash")]
    Cash,
    #[serde(rename = "โอนเงิน", alias = "transfer")]
    Transfer,
    #[serde(rename = "บัตรเครดิต", alias = "credit_card")]
    CreditCard,
}

impl PaymentMethod {
    /// Parse a Thai label or its English alias.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "เงินสด" | "cash" => Some(PaymentMethod::Cash),
            "โอนเงิน" | "transfer" => Some(PaymentMethod::Transfer),
            "บัตรเครดิต" | "credit_card" => Some(PaymentMethod::CreditCard),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "เงินสด",
            PaymentMethod::Transfer => "โอนเงิน",
            PaymentMethod::CreditCard => "บัตรเครดิต",
        }
    }
}

/// Payment status of a visit.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentStatus {
    #[default]
    #[serde(rename = "รอชำระ")]
    Pending,
    #[serde(rename = "ชำระเงินแล้ว")]
    Paid,
}

impl PaymentStatus {
    pub fn label(self) -> &'static str {
        match self {
            PaymentStatus::Pending => "รอชำระ",
            PaymentStatus::Paid => "ชำระเงินแล้ว",
        }
    }
}

/// Cashier input at the payment step.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
    #[serde(default, deserialize_with = "deserialize_loose_f64")]
    pub discount: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_loose_f64")]
    pub received_amount: Option<f64>,
    /// Blank or unrecognized methods read as `None` so the configured default applies
    #[serde(default, deserialize_with = "deserialize_loose_payment_method")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default, deserialize_with = "deserialize_loose_text")]
    pub cashier: Option<String>,
}

fn deserialize_loose_payment_method<'de, D>(
    deserializer: D,
) -> Result<Option<PaymentMethod>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(label) = value.as_ref().and_then(text_from_value) else {
        return Ok(None);
    };
    let method = PaymentMethod::from_label(&label);
    if method.is_none() {
        tracing::warn!(method = %label, "unknown payment method, using configured default");
    }
    Ok(method)
}

/// Finalized payment fields written onto a treatment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentRecord {
    #[serde(rename = "TOTAL_AMOUNT")]
    pub total_amount: f64,
    #[serde(rename = "DISCOUNT_AMOUNT")]
    pub discount_amount: f64,
    /// Total minus discount, floored at zero
    #[serde(rename = "NET_AMOUNT")]
    pub net_amount: f64,
    #[serde(rename = "PAYMENT_STATUS")]
    pub payment_status: PaymentStatus,
    /// Gregorian `YYYY-MM-DD`, Thailand civil date
    #[serde(rename = "PAYMENT_DATE")]
    pub payment_date: String,
    /// `HH:MM:SS`, Thailand civil time
    #[serde(rename = "PAYMENT_TIME")]
    pub payment_time: String,
    #[serde(rename = "PAYMENT_METHOD")]
    pub payment_method: PaymentMethod,
    #[serde(rename = "RECEIVED_AMOUNT")]
    pub received_amount: f64,
    /// Received minus net, floored at zero
    #[serde(rename = "CHANGE_AMOUNT")]
    pub change_amount: f64,
    #[serde(rename = "CASHIER")]
    pub cashier: String,
}

impl PaymentRecord {
    /// Received less than the net amount. Change is still reported as zero.
    pub fn is_underpaid(&self) -> bool {
        self.received_amount < self.net_amount
    }

    /// Amount still owed when underpaid.
    pub fn outstanding(&self) -> f64 {
        (self.net_amount - self.received_amount).max(0.0)
    }
}
