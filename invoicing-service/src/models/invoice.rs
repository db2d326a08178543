//! Invoice aggregate for invoicing-service.

use crate::models::LineItem;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};
use uuid::Uuid;

/// Invoice status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }

    /// Lossy conversion for values read back from storage.
    pub fn from_string(s: &str) -> Self {
        match s {
            "paid" => InvoiceStatus::Paid,
            _ => InvoiceStatus::Pending,
        }
    }

    /// Strict, case-insensitive parse for caller-supplied values.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "paid" => Some(InvoiceStatus::Paid),
            "pending" => Some(InvoiceStatus::Pending),
            _ => None,
        }
    }
}

/// Currency snapshot stored on each invoice. Later edits to an owner's
/// preferences never change what a stored invoice displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub code: String,
    pub symbol: String,
    pub name: String,
}

impl Default for Currency {
    fn default() -> Self {
        Currency {
            code: "INR".to_string(),
            symbol: "₹".to_string(),
            name: "Indian Rupee".to_string(),
        }
    }
}

impl Currency {
    /// Uppercase the code and fill blanks with the INR defaults.
    pub fn normalize(code: Option<&str>, symbol: Option<&str>, name: Option<&str>) -> Self {
        let defaults = Currency::default();
        let code = code.map(str::trim).filter(|c| !c.is_empty());
        Currency {
            code: code
                .map(|c| c.to_ascii_uppercase())
                .unwrap_or(defaults.code),
            symbol: symbol
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .unwrap_or(defaults.symbol),
            name: name
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string)
                .unwrap_or(defaults.name),
        }
    }
}

/// Client details captured at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSnapshot {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Invoice document with its embedded snapshots and stored totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub invoice_id: Uuid,
    pub owner_id: Uuid,
    pub document_number: String,
    pub currency: Currency,
    pub issue_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub client: ClientSnapshot,
    #[serde(default)]
    pub items: Vec<LineItem>,
    pub subtotal: Decimal,
    pub discount_total: Decimal,
    pub tax_total: Decimal,
    pub grand_total: Decimal,
    pub notes: String,
    pub terms: String,
    pub status: InvoiceStatus,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_utc: DateTime<Utc>,
}

// Snapshots live in flat columns; fold them back into value objects here.
// Line items come from their own table and are attached after the fetch.
impl<'r> FromRow<'r, PgRow> for Invoice {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let status: String = row.try_get("status")?;
        Ok(Invoice {
            invoice_id: row.try_get("invoice_id")?,
            owner_id: row.try_get("owner_id")?,
            document_number: row.try_get("document_number")?,
            currency: Currency {
                code: row.try_get("currency_code")?,
                symbol: row.try_get("currency_symbol")?,
                name: row.try_get("currency_name")?,
            },
            issue_date: row.try_get("issue_date")?,
            due_date: row.try_get("due_date")?,
            client: ClientSnapshot {
                name: row.try_get("client_name")?,
                email: row.try_get("client_email")?,
                phone: row.try_get("client_phone")?,
                address: row.try_get("client_address")?,
            },
            items: Vec::new(),
            subtotal: row.try_get("subtotal")?,
            discount_total: row.try_get("discount_total")?,
            tax_total: row.try_get("tax_total")?,
            grand_total: row.try_get("grand_total")?,
            notes: row.try_get("notes")?,
            terms: row.try_get("terms")?,
            status: InvoiceStatus::from_string(&status),
            paid_at: row.try_get("paid_at")?,
            created_utc: row.try_get("created_utc")?,
        })
    }
}

/// Status filter for listing invoices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Paid,
    Pending,
}

impl StatusFilter {
    /// Case-insensitive parse; anything unrecognized means no filter.
    pub fn from_query(s: Option<&str>) -> Self {
        match s.map(|v| v.to_ascii_uppercase()).as_deref() {
            Some("PAID") => StatusFilter::Paid,
            Some("PENDING") => StatusFilter::Pending,
            _ => StatusFilter::All,
        }
    }
}

/// Aggregate figures returned alongside a listing.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceSummary {
    pub total_invoices: usize,
    pub total_received: Decimal,
    pub total_pending: Decimal,
}

/// Input for creating an invoice. Totals and the document number are
/// computed server-side; callers never supply them.
#[derive(Debug, Clone)]
pub struct CreateInvoice {
    pub owner_id: Uuid,
    pub currency: Currency,
    pub issue_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub client: ClientSnapshot,
    pub items: Vec<crate::models::DraftLineItem>,
    pub notes: String,
    pub terms: String,
}
