//! Payables and receivables
//!
//! Both sides of the ledger share the same invoice lifecycle; amounts are
//! integer cents to keep the payloads arithmetic-free in this layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle state of an invoice on either side of the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Open,
    Paid,
    Overdue,
}

/// Money owed to a vendor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payable {
    pub id: String,
    pub company_id: String,
    pub vendor: String,
    pub amount_cents: i64,
    pub currency: String,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
}

/// Payload for creating a payable
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPayable {
    pub company_id: String,
    pub vendor: String,
    pub amount_cents: i64,
    pub currency: String,
    pub due_date: NaiveDate,
}

/// Partial update; `None` fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PayablePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_cents: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<InvoiceStatus>,
}

/// Money owed by a customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receivable {
    pub id: String,
    pub company_id: String,
    pub customer: String,
    pub amount_cents: i64,
    pub currency: String,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
}

/// Payload for creating a receivable
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReceivable {
    pub company_id: String,
    pub customer: String,
    pub amount_cents: i64,
    pub currency: String,
    pub due_date: NaiveDate,
}

/// Partial update; `None` fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReceivablePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_cents: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<InvoiceStatus>,
}
