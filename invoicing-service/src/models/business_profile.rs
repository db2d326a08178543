//! Business profile model for invoicing-service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Per-owner business identity shown on rendered invoices. One row per
/// owner; writes go through an upsert.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BusinessProfile {
    pub profile_id: Uuid,
    pub owner_id: Uuid,
    pub company_name: String,
    pub logo_url: Option<String>,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub gstin: String,
    pub default_terms: String,
    pub created_utc: DateTime<Utc>,
    pub updated_utc: DateTime<Utc>,
}

/// Input for creating or replacing a business profile.
#[derive(Debug, Clone)]
pub struct UpsertBusinessProfile {
    pub company_name: String,
    pub logo_url: Option<String>,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub gstin: String,
    pub default_terms: String,
}
