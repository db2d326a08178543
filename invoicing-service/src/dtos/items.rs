//! Catalog item DTOs.

use crate::dtos::validation_error;
use crate::models::{CatalogItem, CreateCatalogItem, UpdateCatalogItem};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    #[validate(
        required(message = "Name and rate are required"),
        custom(function = validate_item_name)
    )]
    pub name: Option<String>,

    pub unit: Option<String>,

    #[validate(
        required(message = "Name and rate are required"),
        custom(function = validate_rate)
    )]
    pub rate: Option<Decimal>,

    #[validate(custom(function = validate_tax_percent))]
    pub tax_percent: Option<Decimal>,
}

impl CreateItemRequest {
    pub fn into_create(self, owner_id: Uuid) -> CreateCatalogItem {
        CreateCatalogItem {
            owner_id,
            name: self.name.unwrap_or_default().trim().to_string(),
            unit: self.unit.unwrap_or_default(),
            rate: self.rate.unwrap_or_default(),
            tax_percent: self.tax_percent.unwrap_or_default(),
        }
    }
}

/// Partial update: absent fields keep their stored value.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    #[validate(custom(function = validate_item_name))]
    pub name: Option<String>,

    pub unit: Option<String>,

    #[validate(custom(function = validate_rate))]
    pub rate: Option<Decimal>,

    #[validate(custom(function = validate_tax_percent))]
    pub tax_percent: Option<Decimal>,
}

impl UpdateItemRequest {
    pub fn into_update(self) -> UpdateCatalogItem {
        UpdateCatalogItem {
            name: self.name.map(|n| n.trim().to_string()),
            unit: self.unit,
            rate: self.rate,
            tax_percent: self.tax_percent,
        }
    }
}

fn validate_item_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(validation_error("item_name", "Name and rate are required"));
    }
    Ok(())
}

fn validate_rate(rate: &Decimal) -> Result<(), ValidationError> {
    if *rate < Decimal::ZERO {
        return Err(validation_error("rate", "rate cannot be negative"));
    }
    Ok(())
}

fn validate_tax_percent(tax_percent: &Decimal) -> Result<(), ValidationError> {
    if *tax_percent < Decimal::ZERO || *tax_percent > Decimal::ONE_HUNDRED {
        return Err(validation_error(
            "tax_percent",
            "taxPercent must be between 0 and 100",
        ));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItemResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub unit: String,
    pub rate: Decimal,
    pub tax_percent: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CatalogItem> for CatalogItemResponse {
    fn from(item: CatalogItem) -> Self {
        Self {
            id: item.item_id,
            owner_id: item.owner_id,
            name: item.name,
            unit: item.unit,
            rate: item.rate,
            tax_percent: item.tax_percent,
            created_at: item.created_utc,
            updated_at: item.updated_utc,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub item: CatalogItemResponse,
}

#[derive(Debug, Serialize)]
pub struct ItemListResponse {
    pub items: Vec<CatalogItemResponse>,
}

#[derive(Debug, Serialize)]
pub struct ItemDeletedResponse {
    pub message: String,
}

impl ItemDeletedResponse {
    pub fn new() -> Self {
        Self {
            message: "Item deleted".to_string(),
        }
    }
}

impl Default for ItemDeletedResponse {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn create_requires_name_and_rate() {
        let req: CreateItemRequest = serde_json::from_value(json!({ "name": "Design" })).unwrap();
        let err = req.validate().unwrap_err().to_string();
        assert!(err.contains("Name and rate are required"), "{}", err);

        let req: CreateItemRequest = serde_json::from_value(json!({ "rate": 100 })).unwrap();
        let err = req.validate().unwrap_err().to_string();
        assert!(err.contains("Name and rate are required"), "{}", err);

        let req: CreateItemRequest =
            serde_json::from_value(json!({ "name": "Design", "rate": 100 })).unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn create_rejects_negative_rate_and_bad_tax() {
        let req: CreateItemRequest =
            serde_json::from_value(json!({ "name": "Design", "rate": -1 })).unwrap();
        let err = req.validate().unwrap_err().to_string();
        assert!(err.contains("rate cannot be negative"), "{}", err);

        let req: CreateItemRequest =
            serde_json::from_value(json!({ "name": "Design", "rate": 100, "taxPercent": 120 }))
                .unwrap();
        let err = req.validate().unwrap_err().to_string();
        assert!(err.contains("between 0 and 100"), "{}", err);
    }

    #[test]
    fn create_conversion_fills_defaults() {
        let req: CreateItemRequest =
            serde_json::from_value(json!({ "name": "  Design  ", "rate": "150.50" })).unwrap();

        let owner = Uuid::new_v4();
        let input = req.into_create(owner);
        assert_eq!(input.owner_id, owner);
        assert_eq!(input.name, "Design");
        assert_eq!(input.unit, "");
        assert_eq!(input.rate, Decimal::from_str("150.50").unwrap());
        assert_eq!(input.tax_percent, Decimal::ZERO);
    }

    #[test]
    fn update_keeps_absent_fields_unset() {
        let req: UpdateItemRequest = serde_json::from_value(json!({ "rate": 200 })).unwrap();
        assert!(req.validate().is_ok());

        let update = req.into_update();
        assert_eq!(update.name, None);
        assert_eq!(update.unit, None);
        assert_eq!(update.rate, Some(Decimal::from_str("200").unwrap()));
        assert_eq!(update.tax_percent, None);
    }

    #[test]
    fn update_rejects_blank_name() {
        let req: UpdateItemRequest = serde_json::from_value(json!({ "name": "   " })).unwrap();
        assert!(req.validate().is_err());
    }
}
