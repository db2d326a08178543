//! Line item model for invoicing-service.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Stored line item on an invoice.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LineItem {
    pub line_item_id: Uuid,
    pub invoice_id: Uuid,
    pub name: String,
    pub qty: Decimal,
    pub rate: Decimal,
    pub tax_percent: Decimal,
    pub discount: Decimal,
    pub line_total: Decimal,
    pub sort_order: i32,
    pub created_utc: DateTime<Utc>,
}

/// A line item as supplied by the caller, before totals are computed and
/// before anything is persisted. Also the unit the AI rewriter works on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftLineItem {
    pub name: String,
    pub qty: Decimal,
    pub rate: Decimal,
    pub tax_percent: Decimal,
    pub discount: Decimal,
}
