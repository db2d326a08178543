//! Invoice document DTOs.
//!
//! Requests validate the caller's shape before anything touches the
//! database; responses flatten the stored aggregate into the camelCase
//! wire names the API exposes. Amounts travel as decimal strings.

use crate::dtos::validation_error;
use crate::models::{
    ClientSnapshot, CreateInvoice, Currency, DraftLineItem, Invoice, InvoiceStatus, InvoiceSummary,
    LineItem,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceRequest {
    #[validate(required(message = "issueDate is required"))]
    pub issue_date: Option<NaiveDate>,

    pub due_date: Option<NaiveDate>,

    pub currency: Option<CurrencyInput>,

    #[validate(required(message = "client name is required"), nested)]
    pub client: Option<ClientInput>,

    #[serde(default)]
    #[validate(length(min = 1, message = "At least 1 item is required"), nested)]
    pub items: Vec<LineItemInput>,

    pub notes: Option<String>,

    pub terms: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CurrencyInput {
    pub code: Option<String>,
    pub symbol: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct ClientInput {
    #[validate(
        required(message = "client name is required"),
        custom(function = validate_client_name)
    )]
    pub name: Option<String>,

    pub email: Option<String>,

    pub phone: Option<String>,

    pub address: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LineItemInput {
    #[validate(
        required(message = "Item name required"),
        custom(function = validate_item_name)
    )]
    pub name: Option<String>,

    #[validate(required(message = "Item qty invalid"), custom(function = validate_qty))]
    pub qty: Option<Decimal>,

    #[validate(required(message = "Item rate invalid"), custom(function = validate_rate))]
    pub rate: Option<Decimal>,

    #[validate(custom(function = validate_tax_percent))]
    pub tax_percent: Option<Decimal>,

    #[validate(custom(function = validate_discount))]
    pub discount: Option<Decimal>,
}

fn validate_client_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(validation_error("client_name", "client name is required"));
    }
    Ok(())
}

fn validate_item_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(validation_error("item_name", "Item name required"));
    }
    Ok(())
}

fn validate_qty(qty: &Decimal) -> Result<(), ValidationError> {
    if *qty <= Decimal::ZERO {
        return Err(validation_error("qty", "Item qty invalid"));
    }
    Ok(())
}

fn validate_rate(rate: &Decimal) -> Result<(), ValidationError> {
    if *rate < Decimal::ZERO {
        return Err(validation_error("rate", "Item rate invalid"));
    }
    Ok(())
}

fn validate_tax_percent(tax_percent: &Decimal) -> Result<(), ValidationError> {
    if *tax_percent < Decimal::ZERO || *tax_percent > Decimal::ONE_HUNDRED {
        return Err(validation_error(
            "tax_percent",
            "Item taxPercent must be between 0 and 100",
        ));
    }
    Ok(())
}

fn validate_discount(discount: &Decimal) -> Result<(), ValidationError> {
    if *discount < Decimal::ZERO {
        return Err(validation_error(
            "discount",
            "Item discount cannot be negative",
        ));
    }
    Ok(())
}

impl CreateInvoiceRequest {
    /// Convert into the storage input. Call after `validate()`; at that
    /// point the required fields are present and absent optionals collapse
    /// to their defaults.
    pub fn into_create_invoice(self, owner_id: Uuid) -> CreateInvoice {
        let currency = self.currency.unwrap_or_default();
        let client = self.client.unwrap_or_default();

        CreateInvoice {
            owner_id,
            currency: Currency::normalize(
                currency.code.as_deref(),
                currency.symbol.as_deref(),
                currency.name.as_deref(),
            ),
            issue_date: self.issue_date.unwrap_or_default(),
            due_date: self.due_date,
            client: ClientSnapshot {
                name: client.name.unwrap_or_default().trim().to_string(),
                email: client.email.unwrap_or_default(),
                phone: client.phone.unwrap_or_default(),
                address: client.address.unwrap_or_default(),
            },
            items: self
                .items
                .into_iter()
                .map(|item| DraftLineItem {
                    name: item.name.unwrap_or_default().trim().to_string(),
                    qty: item.qty.unwrap_or_default(),
                    rate: item.rate.unwrap_or_default(),
                    tax_percent: item.tax_percent.unwrap_or_default(),
                    discount: item.discount.unwrap_or_default(),
                })
                .collect(),
            notes: self.notes.unwrap_or_default(),
            terms: self.terms.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListDocumentsParams {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemResponse {
    pub id: Uuid,
    pub name: String,
    pub qty: Decimal,
    pub rate: Decimal,
    pub tax_percent: Decimal,
    pub discount: Decimal,
    pub line_total: Decimal,
}

impl From<LineItem> for LineItemResponse {
    fn from(item: LineItem) -> Self {
        Self {
            id: item.line_item_id,
            name: item.name,
            qty: item.qty,
            rate: item.rate,
            tax_percent: item.tax_percent,
            discount: item.discount,
            line_total: item.line_total,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub document_number: String,
    pub currency: Currency,
    pub issue_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub client: ClientSnapshot,
    pub items: Vec<LineItemResponse>,
    pub subtotal: Decimal,
    pub discount_total: Decimal,
    pub tax_total: Decimal,
    pub grand_total: Decimal,
    pub notes: String,
    pub terms: String,
    pub status: InvoiceStatus,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Invoice> for InvoiceResponse {
    fn from(invoice: Invoice) -> Self {
        Self {
            id: invoice.invoice_id,
            owner_id: invoice.owner_id,
            document_number: invoice.document_number,
            currency: invoice.currency,
            issue_date: invoice.issue_date,
            due_date: invoice.due_date,
            client: invoice.client,
            items: invoice
                .items
                .into_iter()
                .map(LineItemResponse::from)
                .collect(),
            subtotal: invoice.subtotal,
            discount_total: invoice.discount_total,
            tax_total: invoice.tax_total,
            grand_total: invoice.grand_total,
            notes: invoice.notes,
            terms: invoice.terms,
            status: invoice.status,
            paid_at: invoice.paid_at,
            created_at: invoice.created_utc,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub document: InvoiceResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub total_invoices: usize,
    pub total_received: Decimal,
    pub total_pending: Decimal,
}

impl From<InvoiceSummary> for SummaryResponse {
    fn from(summary: InvoiceSummary) -> Self {
        Self {
            total_invoices: summary.total_invoices,
            total_received: summary.total_received,
            total_pending: summary.total_pending,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DocumentListResponse {
    pub documents: Vec<InvoiceResponse>,
    pub summary: SummaryResponse,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    fn valid_body() -> serde_json::Value {
        json!({
            "issueDate": "2025-03-01",
            "client": { "name": "Acme Corp" },
            "items": [
                { "name": "Design", "qty": 2, "rate": 100 }
            ]
        })
    }

    fn request_from(body: serde_json::Value) -> CreateInvoiceRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn minimal_request_passes_validation() {
        let req = request_from(valid_body());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn missing_issue_date_is_rejected() {
        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("issueDate");

        let req = request_from(body);
        let err = req.validate().unwrap_err().to_string();
        assert!(err.contains("issueDate is required"), "{}", err);
    }

    #[test]
    fn blank_client_name_is_rejected() {
        let mut body = valid_body();
        body["client"]["name"] = json!("   ");

        let req = request_from(body);
        let err = req.validate().unwrap_err().to_string();
        assert!(err.contains("client name is required"), "{}", err);
    }

    #[test]
    fn missing_client_is_rejected() {
        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("client");

        let req = request_from(body);
        let err = req.validate().unwrap_err().to_string();
        assert!(err.contains("client name is required"), "{}", err);
    }

    #[test]
    fn empty_items_are_rejected() {
        let mut body = valid_body();
        body["items"] = json!([]);

        let req = request_from(body);
        let err = req.validate().unwrap_err().to_string();
        assert!(err.contains("At least 1 item is required"), "{}", err);
    }

    #[test]
    fn zero_qty_is_rejected_but_fractional_is_fine() {
        let mut body = valid_body();
        body["items"][0]["qty"] = json!(0);
        let err = request_from(body).validate().unwrap_err().to_string();
        assert!(err.contains("Item qty invalid"), "{}", err);

        let mut body = valid_body();
        body["items"][0]["qty"] = json!(0.5);
        assert!(request_from(body).validate().is_ok());
    }

    #[test]
    fn negative_rate_is_rejected_but_zero_is_fine() {
        let mut body = valid_body();
        body["items"][0]["rate"] = json!(-1);
        let err = request_from(body).validate().unwrap_err().to_string();
        assert!(err.contains("Item rate invalid"), "{}", err);

        let mut body = valid_body();
        body["items"][0]["rate"] = json!(0);
        assert!(request_from(body).validate().is_ok());
    }

    #[test]
    fn tax_percent_outside_0_to_100_is_rejected() {
        let mut body = valid_body();
        body["items"][0]["taxPercent"] = json!(101);
        let err = request_from(body).validate().unwrap_err().to_string();
        assert!(err.contains("between 0 and 100"), "{}", err);

        let mut body = valid_body();
        body["items"][0]["taxPercent"] = json!(100);
        assert!(request_from(body).validate().is_ok());
    }

    #[test]
    fn negative_discount_is_rejected() {
        let mut body = valid_body();
        body["items"][0]["discount"] = json!(-5);
        let err = request_from(body).validate().unwrap_err().to_string();
        assert!(err.contains("discount cannot be negative"), "{}", err);
    }

    #[test]
    fn conversion_trims_names_and_defaults_currency() {
        let owner = Uuid::new_v4();
        let req = request_from(json!({
            "issueDate": "2025-03-01",
            "client": { "name": "  Acme Corp  " },
            "items": [
                { "name": "  Design  ", "qty": 2, "rate": 100 }
            ]
        }));

        let input = req.into_create_invoice(owner);
        assert_eq!(input.owner_id, owner);
        assert_eq!(input.client.name, "Acme Corp");
        assert_eq!(input.client.email, "");
        assert_eq!(input.items[0].name, "Design");
        assert_eq!(input.items[0].discount, Decimal::ZERO);
        assert_eq!(input.currency.code, "INR");
        assert_eq!(input.currency.symbol, "₹");
        assert_eq!(input.notes, "");
    }

    #[test]
    fn conversion_keeps_supplied_currency_and_dates() {
        let req = request_from(json!({
            "issueDate": "2025-03-01",
            "dueDate": "2025-03-15",
            "currency": { "code": "usd", "symbol": "$", "name": "US Dollar" },
            "client": { "name": "Acme", "email": "billing@acme.test" },
            "items": [ { "name": "Design", "qty": 1, "rate": 50 } ],
            "notes": "Net 15",
            "terms": "Wire only"
        }));

        let input = req.into_create_invoice(Uuid::new_v4());
        assert_eq!(input.currency.code, "USD");
        assert_eq!(input.currency.symbol, "$");
        assert_eq!(input.issue_date, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(input.due_date, NaiveDate::from_ymd_opt(2025, 3, 15));
        assert_eq!(input.client.email, "billing@acme.test");
        assert_eq!(input.notes, "Net 15");
        assert_eq!(input.terms, "Wire only");
    }

    #[test]
    fn response_uses_camel_case_wire_names() {
        let invoice = Invoice {
            invoice_id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            document_number: "INV-0042".to_string(),
            currency: Currency::default(),
            issue_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            due_date: None,
            client: ClientSnapshot {
                name: "Acme".to_string(),
                email: String::new(),
                phone: String::new(),
                address: String::new(),
            },
            items: Vec::new(),
            subtotal: Decimal::from_str("200").unwrap(),
            discount_total: Decimal::ZERO,
            tax_total: Decimal::from_str("36").unwrap(),
            grand_total: Decimal::from_str("236").unwrap(),
            notes: String::new(),
            terms: String::new(),
            status: InvoiceStatus::Pending,
            paid_at: None,
            created_utc: Utc::now(),
        };

        let body = serde_json::to_value(DocumentResponse {
            document: InvoiceResponse::from(invoice),
        })
        .unwrap();

        let document = &body["document"];
        assert_eq!(document["documentNumber"], "INV-0042");
        assert_eq!(document["status"], "pending");
        assert!(document["paidAt"].is_null());
        assert!(document["dueDate"].is_null());
        assert!(document.get("grandTotal").is_some());
        assert!(document.get("createdAt").is_some());
        assert_eq!(
            Decimal::from_str(document["grandTotal"].as_str().unwrap()).unwrap(),
            Decimal::from_str("236").unwrap()
        );
    }
}
