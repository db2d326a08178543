//! Catalog item model for invoicing-service.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Reusable per-owner line-item preset. Invoices copy values from presets
/// at composition time and never reference them afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CatalogItem {
    pub item_id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub unit: String,
    pub rate: Decimal,
    pub tax_percent: Decimal,
    pub created_utc: DateTime<Utc>,
    pub updated_utc: DateTime<Utc>,
}

/// Input for creating a catalog item.
#[derive(Debug, Clone)]
pub struct CreateCatalogItem {
    pub owner_id: Uuid,
    pub name: String,
    pub unit: String,
    pub rate: Decimal,
    pub tax_percent: Decimal,
}

/// Input for updating a catalog item. Unset fields keep their value.
#[derive(Debug, Clone, Default)]
pub struct UpdateCatalogItem {
    pub name: Option<String>,
    pub unit: Option<String>,
    pub rate: Option<Decimal>,
    pub tax_percent: Option<Decimal>,
}
