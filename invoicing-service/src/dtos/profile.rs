//! Business profile DTOs.

use crate::dtos::validation_error;
use crate::models::{BusinessProfile, UpsertBusinessProfile};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Upsert body. `companyName` is the only required field; everything else
/// defaults to empty. A missing or blank `logoUrl` keeps whatever logo is
/// already stored.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpsertProfileRequest {
    #[validate(
        required(message = "companyName is required"),
        custom(function = validate_company_name)
    )]
    pub company_name: Option<String>,

    pub logo_url: Option<String>,

    pub phone: Option<String>,

    pub email: Option<String>,

    pub address: Option<String>,

    pub gstin: Option<String>,

    pub default_terms: Option<String>,
}

fn validate_company_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(validation_error("company_name", "companyName is required"));
    }
    Ok(())
}

impl UpsertProfileRequest {
    pub fn into_upsert(self) -> UpsertBusinessProfile {
        UpsertBusinessProfile {
            company_name: self.company_name.unwrap_or_default().trim().to_string(),
            logo_url: self.logo_url.filter(|url| !url.trim().is_empty()),
            phone: self.phone.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            address: self.address.unwrap_or_default(),
            gstin: self.gstin.unwrap_or_default(),
            default_terms: self.default_terms.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessProfileResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub company_name: String,
    pub logo_url: Option<String>,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub gstin: String,
    pub default_terms: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BusinessProfile> for BusinessProfileResponse {
    fn from(profile: BusinessProfile) -> Self {
        Self {
            id: profile.profile_id,
            owner_id: profile.owner_id,
            company_name: profile.company_name,
            logo_url: profile.logo_url,
            phone: profile.phone,
            email: profile.email,
            address: profile.address,
            gstin: profile.gstin,
            default_terms: profile.default_terms,
            created_at: profile.created_utc,
            updated_at: profile.updated_utc,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub profile: BusinessProfileResponse,
}

#[derive(Debug, Serialize)]
pub struct ExistsResponse {
    pub exists: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_company_name_is_rejected() {
        let req: UpsertProfileRequest = serde_json::from_value(json!({})).unwrap();
        let err = req.validate().unwrap_err().to_string();
        assert!(err.contains("companyName is required"), "{}", err);

        let req: UpsertProfileRequest =
            serde_json::from_value(json!({ "companyName": "  " })).unwrap();
        let err = req.validate().unwrap_err().to_string();
        assert!(err.contains("companyName is required"), "{}", err);
    }

    #[test]
    fn conversion_defaults_optionals_and_trims_name() {
        let req: UpsertProfileRequest =
            serde_json::from_value(json!({ "companyName": "  Studio Nine  " })).unwrap();

        let input = req.into_upsert();
        assert_eq!(input.company_name, "Studio Nine");
        assert_eq!(input.phone, "");
        assert_eq!(input.gstin, "");
        assert_eq!(input.logo_url, None);
    }

    #[test]
    fn blank_logo_url_counts_as_absent() {
        let req: UpsertProfileRequest = serde_json::from_value(json!({
            "companyName": "Studio Nine",
            "logoUrl": "   "
        }))
        .unwrap();
        assert_eq!(req.into_upsert().logo_url, None);

        let req: UpsertProfileRequest = serde_json::from_value(json!({
            "companyName": "Studio Nine",
            "logoUrl": "https://cdn.example.test/logo.png"
        }))
        .unwrap();
        assert_eq!(
            req.into_upsert().logo_url.as_deref(),
            Some("https://cdn.example.test/logo.png")
        );
    }
}
