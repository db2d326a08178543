//! AI endpoint DTOs.

use crate::services::ai::RewriteItem;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Rewrite request: the draft rows plus optional context that only steers
/// the prompt. Blank context falls back inside the prompt builder.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RewriteItemsRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Items are required"))]
    pub items: Vec<RewriteItem>,

    #[serde(default)]
    pub business_name: String,

    #[serde(default)]
    pub client_name: String,

    #[serde(default)]
    pub currency: String,
}

#[derive(Debug, Serialize)]
pub struct RewriteItemsResponse {
    pub items: Vec<RewriteItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_items_are_rejected() {
        let req: RewriteItemsRequest = serde_json::from_value(json!({})).unwrap();
        let err = req.validate().unwrap_err().to_string();
        assert!(err.contains("Items are required"), "{}", err);
    }

    #[test]
    fn context_defaults_to_empty_strings() {
        let req: RewriteItemsRequest = serde_json::from_value(json!({
            "items": [ { "name": "logo", "qty": 1, "rate": 500 } ]
        }))
        .unwrap();

        assert!(req.validate().is_ok());
        assert_eq!(req.business_name, "");
        assert_eq!(req.client_name, "");
        assert_eq!(req.currency, "");
        assert_eq!(req.items[0].name, "logo");
    }
}
