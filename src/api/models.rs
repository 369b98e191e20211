//! Typed models for the payloads exchanged with the livestock API.
//!
//! The API serializes decimal amounts inconsistently (sometimes numbers,
//! sometimes strings like `"1234.50"`), so the monetary fields use lenient
//! deserializers that accept either.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A financial record tied to one animal, as returned by the livestock API.
///
/// `total_amount` is expected to equal `price + tax_amount` at creation time,
/// but the stored value is authoritative and is never recomputed here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The remote-assigned identifier. Never derived client-side.
    pub id: String,
    /// The kind of transaction, e.g. "sale", "purchase", "transfer",
    /// "service", "lease". Open-ended upstream.
    #[serde(default)]
    pub transaction_type: String,
    /// The price before tax.
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub price: Option<f64>,
    /// The tax charged on top of the price.
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub tax_amount: Option<f64>,
    /// The authoritative total as stored by the remote system.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_amount: f64,
    /// Any deposit already paid.
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub deposit_amount: Option<f64>,
    /// The amount still owing.
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub balance_due: Option<f64>,
    /// Insurance cover taken out for the transfer, if any.
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub insurance_amount: Option<f64>,
    /// ISO 4217 currency code.
    #[serde(default)]
    pub currency: String,
    /// When the transaction took place (ISO-8601).
    #[serde(default)]
    pub transaction_date: String,
    /// When the animal changes hands (ISO-8601).
    #[serde(default)]
    pub delivery_date: Option<String>,
    /// When payment is due (ISO-8601).
    #[serde(default)]
    pub payment_due_date: Option<String>,
    /// Free-form status string. Compared case- and whitespace-insensitively;
    /// absent means "unknown".
    #[serde(default = "unknown_status")]
    pub transaction_status: String,
    /// The seller's display name.
    #[serde(default)]
    pub seller_name: String,
    #[serde(default)]
    pub seller_email: Option<String>,
    #[serde(default)]
    pub seller_phone: Option<String>,
    #[serde(default)]
    pub seller_company: Option<String>,
    /// The buyer's display name.
    #[serde(default)]
    pub buyer_name: String,
    #[serde(default)]
    pub buyer_email: Option<String>,
    #[serde(default)]
    pub buyer_phone: Option<String>,
    #[serde(default)]
    pub buyer_company: Option<String>,
    /// Free-text description of the transaction.
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub delivery_instructions: Option<String>,
    #[serde(default)]
    pub terms_and_conditions: Option<String>,
    #[serde(default)]
    pub special_conditions: Option<String>,
    /// Attached documents (contracts, certificates, invoices).
    #[serde(default)]
    pub documents: Vec<TransactionDocument>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

fn unknown_status() -> String {
    "unknown".to_owned()
}

/// A document attached to a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDocument {
    pub id: String,
    pub name: String,
    pub url: String,
    /// Size in bytes, when the API reports it.
    #[serde(default)]
    pub size: Option<u64>,
    /// MIME type or a coarse label like "contract".
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// A read-only aggregate over one animal's transactions, computed by the
/// remote system on every fetch. Never persisted client-side.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TransactionSummary {
    /// Pre-aggregated headline numbers.
    #[serde(default)]
    pub overview: SummaryOverview,
    /// Count of transactions per raw status label.
    ///
    /// `sum(values)` is expected to equal `overview.total_transactions` but
    /// this is not verified locally.
    #[serde(default)]
    pub status_distribution: BTreeMap<String, u32>,
    /// Ordered month-by-month counts and totals.
    #[serde(default)]
    pub monthly_trends: Vec<MonthlyTrend>,
    /// Lightweight projections, most-recent-first, bounded upstream.
    #[serde(default)]
    pub recent_transactions: Vec<RecentTransaction>,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub last_updated: Option<String>,
}

/// The pre-aggregated headline numbers of a [TransactionSummary].
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SummaryOverview {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_value: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub average_value: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub highest_value: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub lowest_value: f64,
    #[serde(default)]
    pub total_transactions: u32,
    #[serde(default)]
    pub completed_transactions: u32,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub pending_amount: f64,
}

/// One month's entry in a summary's trend series.
///
/// Every field is optional because the API has been observed to omit any of
/// them; the aggregation layer coerces the gaps before charting.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MonthlyTrend {
    #[serde(default)]
    pub month: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub transaction_count: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub total_amount: Option<f64>,
}

/// The lightweight transaction projection in a summary's recent list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecentTransaction {
    pub id: String,
    #[serde(default)]
    pub transaction_type: String,
    #[serde(default = "unknown_status")]
    pub transaction_status: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_amount: f64,
    #[serde(default)]
    pub transaction_date: String,
    #[serde(default)]
    pub details: Option<String>,
}

/// An animal as listed by the index endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnimalSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tag_number: Option<String>,
    #[serde(default)]
    pub species: Option<String>,
}

/// The body for creating or partially updating a transaction.
///
/// Every field is optional and `None` fields are omitted from the JSON, which
/// gives PATCH its partial-merge semantic: omitted fields are left untouched
/// server-side.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TransactionPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposit_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms_and_conditions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_conditions: Option<String>,
}

/// Deserialize an amount that may be a number, a numeric string, or absent.
/// Unparseable values become `0.0` rather than failing the whole payload.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_f64(deserializer)?.unwrap_or(0.0))
}

/// Deserialize an optional amount that may be a number or a numeric string.
fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;

    Ok(match value {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse().ok(),
        _ => None,
    })
}
