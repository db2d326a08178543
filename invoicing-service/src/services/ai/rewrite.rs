//! Line item name rewriting.

use super::json::parse_json_with_repair;
use super::providers::{ChatProvider, ChatRequest, ProviderError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use service_core::error::AppError;
use tracing::warn;

const REWRITE_SYSTEM: &str = "You output ONLY valid JSON. No extra text.";

/// Compact line item exchanged with the rewrite flow. Only `name` is
/// ever modified; the numeric fields ride along as model context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RewriteItem {
    pub name: String,
    pub qty: Decimal,
    pub rate: Decimal,
    pub tax_percent: Decimal,
    pub discount: Decimal,
}

impl Default for RewriteItem {
    fn default() -> Self {
        Self {
            name: String::new(),
            qty: Decimal::ONE,
            rate: Decimal::ZERO,
            tax_percent: Decimal::ZERO,
            discount: Decimal::ZERO,
        }
    }
}

/// Build the rewrite prompt: a numbered listing of the items plus just
/// enough business context for the model to sharpen the wording.
pub fn build_rewrite_prompt(
    items: &[RewriteItem],
    business_name: &str,
    client_name: &str,
    currency: &str,
) -> String {
    let seller = match business_name.trim() {
        "" => "Freelancer",
        name => name,
    };
    let client = match client_name.trim() {
        "" => "Client",
        name => name,
    };
    let currency = match currency.trim() {
        "" => "INR",
        code => code,
    };

    let mut item_lines = String::new();
    for (idx, item) in items.iter().enumerate() {
        item_lines.push_str(&format!(
            "{}. name=\"{}\", qty={}, rate={}, taxPercent={}, discount={}\n",
            idx + 1,
            item.name.trim(),
            item.qty.normalize(),
            item.rate.normalize(),
            item.tax_percent.normalize(),
            item.discount.normalize(),
        ));
    }

    format!(
        r#"You are InvoiceDesk AI. Improve invoice line item names to be dispute-proof and professional.

Goal:
- Convert vague names into clear scope-based descriptions.
- Keep it SHORT but specific (max ~12 words each).
- Do NOT change numbers, qty, rate, taxPercent, discount.
- Only rewrite the "name" fields.

Context:
Seller: {seller}
Client: {client}
Currency: {currency}

Input items:
{item_lines}
Return ONLY valid JSON object (no markdown, no backticks, no extra text).
Schema:
{{
  "items": [
    {{ "index": 0, "name": "..." }},
    {{ "index": 1, "name": "..." }}
  ]
}}"#,
        seller = seller,
        client = client,
        currency = currency,
        item_lines = item_lines,
    )
}

/// Merge model suggestions into the original items. A suggestion applies
/// only when its index is an in-range integer and its name is non-blank;
/// every other row keeps its original name, and numeric fields are never
/// touched.
pub fn apply_rewrites(items: &[RewriteItem], parsed: &Value) -> Vec<RewriteItem> {
    let mut updated: Vec<RewriteItem> = items.to_vec();

    let Some(rows) = parsed.get("items").and_then(Value::as_array) else {
        return updated;
    };

    for row in rows {
        let Some(idx) = row.get("index").and_then(Value::as_u64) else {
            continue;
        };
        let Some(name) = row.get("name").and_then(Value::as_str) else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        if let Some(item) = updated.get_mut(idx as usize) {
            item.name = name.to_string();
        }
    }

    updated
}

/// Rewrite item names through the model. Partial success is expected:
/// rows the model skipped or mangled come back unchanged.
pub async fn rewrite_item_names(
    provider: &dyn ChatProvider,
    items: &[RewriteItem],
    business_name: &str,
    client_name: &str,
    currency: &str,
) -> Result<Vec<RewriteItem>, AppError> {
    let prompt = build_rewrite_prompt(items, business_name, client_name, currency);

    let request = ChatRequest {
        system: Some(REWRITE_SYSTEM.to_string()),
        prompt,
        temperature: 0.2,
        max_tokens: 500,
        json_only: true,
    };

    let raw = provider.complete(&request).await.map_err(|e| match e {
        ProviderError::Timeout => AppError::UpstreamTimeout("AI rewrite timed out".to_string()),
        other => {
            warn!(error = %other, "Rewrite completion failed");
            AppError::BadGateway("AI rewrite failed".to_string())
        }
    })?;

    let parsed = parse_json_with_repair(&raw)
        .filter(|v| v.get("items").map_or(false, Value::is_array))
        .ok_or_else(|| AppError::BadGateway(format!("AI returned invalid JSON: {}", raw)))?;

    Ok(apply_rewrites(items, &parsed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ai::providers::MockChatProvider;
    use serde_json::json;
    use std::str::FromStr;

    fn item(name: &str, qty: &str, rate: &str) -> RewriteItem {
        RewriteItem {
            name: name.to_string(),
            qty: Decimal::from_str(qty).unwrap(),
            rate: Decimal::from_str(rate).unwrap(),
            tax_percent: Decimal::ZERO,
            discount: Decimal::ZERO,
        }
    }

    #[test]
    fn prompt_lists_items_with_fallback_context() {
        let items = vec![item("logo", "1", "5000"), item("site", "2", "100.50")];

        let prompt = build_rewrite_prompt(&items, "", "", "");

        assert!(prompt.contains("Seller: Freelancer"));
        assert!(prompt.contains("Client: Client"));
        assert!(prompt.contains("Currency: INR"));
        assert!(prompt.contains("1. name=\"logo\", qty=1, rate=5000"));
        assert!(prompt.contains("2. name=\"site\", qty=2, rate=100.5,"));
    }

    #[test]
    fn prompt_uses_supplied_context() {
        let prompt = build_rewrite_prompt(&[item("x", "1", "1")], "Bolt & Nut", "Acme", "USD");

        assert!(prompt.contains("Seller: Bolt & Nut"));
        assert!(prompt.contains("Client: Acme"));
        assert!(prompt.contains("Currency: USD"));
    }

    #[test]
    fn valid_suggestions_replace_names_only() {
        let items = vec![item("logo", "1", "5000"), item("site", "2", "100")];
        let parsed = json!({"items": [
            {"index": 0, "name": "Brand logo design, 3 concepts, 2 revisions"},
            {"index": 1, "name": "Marketing site build, 5 pages"}
        ]});

        let updated = apply_rewrites(&items, &parsed);

        assert_eq!(updated[0].name, "Brand logo design, 3 concepts, 2 revisions");
        assert_eq!(updated[1].name, "Marketing site build, 5 pages");
        assert_eq!(updated[0].qty, items[0].qty);
        assert_eq!(updated[0].rate, items[0].rate);
        assert_eq!(updated.len(), 2);
    }

    #[test]
    fn out_of_range_and_malformed_rows_are_skipped() {
        let items = vec![item("logo", "1", "5000")];
        let parsed = json!({"items": [
            {"index": 5, "name": "Out of range"},
            {"index": -1, "name": "Negative"},
            {"index": "zero", "name": "Stringly"},
            {"index": 0, "name": "   "},
            {"index": 0}
        ]});

        let updated = apply_rewrites(&items, &parsed);

        assert_eq!(updated[0].name, "logo");
    }

    #[test]
    fn missing_items_array_keeps_everything() {
        let items = vec![item("logo", "1", "5000")];

        let updated = apply_rewrites(&items, &json!({"items": "nope"}));
        assert_eq!(updated[0].name, "logo");

        let updated = apply_rewrites(&items, &json!({}));
        assert_eq!(updated[0].name, "logo");
    }

    #[tokio::test]
    async fn rewrites_through_provider_with_fenced_reply() {
        let provider = MockChatProvider::with_responses([
            "```json\n{\"items\": [{\"index\": 0, \"name\": \"Logo design package\"},]}\n```",
        ]);
        let items = vec![item("logo", "1", "5000")];

        let updated = rewrite_item_names(&provider, &items, "Studio", "Acme", "INR")
            .await
            .unwrap();

        assert_eq!(updated[0].name, "Logo design package");
    }

    #[tokio::test]
    async fn invalid_reply_fails_with_raw_text() {
        let provider = MockChatProvider::with_responses(["total garbage"]);
        let items = vec![item("logo", "1", "5000")];

        let err = rewrite_item_names(&provider, &items, "", "", "")
            .await
            .unwrap_err();

        match err {
            AppError::BadGateway(msg) => {
                assert!(msg.contains("AI returned invalid JSON"));
                assert!(msg.contains("total garbage"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
