//! Payment reminder generation.

use super::json::parse_json_block;
use super::providers::{ChatProvider, ChatRequest, ProviderError};
use crate::models::Invoice;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use tracing::warn;

const REMINDER_FAILED: &str = "AI generation failed";
const REMINDER_TIMED_OUT: &str = "AI generation timed out";

/// Register of a reminder message, derived from how overdue the invoice is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderTone {
    Polite,
    Professional,
    Firm,
}

impl ReminderTone {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderTone::Polite => "polite",
            ReminderTone::Professional => "professional",
            ReminderTone::Firm => "firm",
        }
    }
}

/// A generated reminder plus the tone that shaped it.
#[derive(Debug, Clone, Serialize)]
pub struct Reminder {
    pub message: String,
    pub tone: ReminderTone,
}

/// Derive the tone from calendar days overdue. Anything less than three
/// days past due (including not yet due) stays polite; a week or more
/// turns firm. No due date means there is nothing to chase, so polite.
pub fn compute_tone(due_date: Option<NaiveDate>, today: NaiveDate) -> ReminderTone {
    let Some(due) = due_date else {
        return ReminderTone::Polite;
    };

    let days_overdue = (today - due).num_days();

    if days_overdue < 3 {
        ReminderTone::Polite
    } else if days_overdue < 7 {
        ReminderTone::Professional
    } else {
        ReminderTone::Firm
    }
}

/// Build the generation prompt. The model is told to answer with a
/// single-line JSON object so the reply survives transport through
/// chat-style frontends.
pub fn build_reminder_prompt(invoice: &Invoice, tone: ReminderTone) -> String {
    let client_name = match invoice.client.name.trim() {
        "" => "Client",
        name => name,
    };
    let number = match invoice.document_number.as_str() {
        "" => "N/A",
        number => number,
    };
    let due_date = invoice
        .due_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let amount = format!("{}{:.2}", invoice.currency.symbol, invoice.grand_total);

    format!(
        r#"You are InvoiceDesk. Generate a premium WhatsApp payment reminder message.

Tone: {tone}
Language: English
Length: 900–1400 characters

Rules:
- Output MUST be valid JSON only (no markdown, no extra text).
- JSON must be in ONE LINE.
- Use \n for line breaks inside the message string.
- Do NOT include any trailing commas.

Message requirements:
- Greeting based on tone
- Clear title line: "Payment Reminder — Invoice {number}"
- Invoice details in bullet points:
  • Invoice No: {number}
  • Due Date: {due_date}
  • Amount: {amount}
- Ask to confirm expected settlement date
- Offer to resend invoice PDF if needed
- Say thank you at the end

Return exactly:
{{"message":"..."}}
Client: {client_name}
Invoice: {number}
Due Date: {due_date}
Amount: {amount}"#,
        tone = tone.as_str(),
        number = number,
        due_date = due_date,
        amount = amount,
        client_name = client_name,
    )
}

/// Extract a non-empty `message` from the model reply.
fn parse_reminder_reply(raw: &str) -> Option<String> {
    let value = parse_json_block(raw)?;
    let message = value.get("message")?.as_str()?.trim();
    if message.is_empty() {
        None
    } else {
        Some(message.to_string())
    }
}

/// Generate a payment reminder for an invoice. The model must return a
/// usable `message`; an unparseable or empty reply fails the request
/// rather than handing the caller a blank reminder.
pub async fn generate_reminder(
    provider: &dyn ChatProvider,
    invoice: &Invoice,
) -> Result<Reminder, AppError> {
    let tone = compute_tone(invoice.due_date, chrono::Utc::now().date_naive());
    let prompt = build_reminder_prompt(invoice, tone);

    let request = ChatRequest {
        system: None,
        prompt,
        temperature: 0.35,
        max_tokens: 512,
        json_only: false,
    };

    let raw = provider.complete(&request).await.map_err(|e| match e {
        ProviderError::Timeout => AppError::UpstreamTimeout(REMINDER_TIMED_OUT.to_string()),
        other => {
            warn!(error = %other, "Reminder completion failed");
            AppError::BadGateway(REMINDER_FAILED.to_string())
        }
    })?;

    let message = parse_reminder_reply(&raw).ok_or_else(|| {
        warn!(raw_len = raw.len(), "Reminder reply carried no usable message");
        AppError::BadGateway(REMINDER_FAILED.to_string())
    })?;

    Ok(Reminder { message, tone })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClientSnapshot, Currency, InvoiceStatus};
    use crate::services::ai::providers::MockChatProvider;
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use uuid::Uuid;

    fn day(offset: i64) -> NaiveDate {
        Utc::now().date_naive() + Duration::days(offset)
    }

    fn invoice_due(due_date: Option<NaiveDate>) -> Invoice {
        Invoice {
            invoice_id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            document_number: "INV-0042".to_string(),
            currency: Currency::default(),
            issue_date: day(-30),
            due_date,
            client: ClientSnapshot {
                name: "Acme Corp".to_string(),
                email: String::new(),
                phone: String::new(),
                address: String::new(),
            },
            items: Vec::new(),
            subtotal: Decimal::from_str("200").unwrap(),
            discount_total: Decimal::from_str("20").unwrap(),
            tax_total: Decimal::from_str("18").unwrap(),
            grand_total: Decimal::from_str("198").unwrap(),
            notes: String::new(),
            terms: String::new(),
            status: InvoiceStatus::Pending,
            paid_at: None,
            created_utc: Utc::now(),
        }
    }

    #[test]
    fn tone_without_due_date_is_polite() {
        let today = day(0);
        assert_eq!(compute_tone(None, today), ReminderTone::Polite);
    }

    #[test]
    fn tone_tracks_days_overdue() {
        let today = day(0);

        assert_eq!(compute_tone(Some(day(-1)), today), ReminderTone::Polite);
        assert_eq!(compute_tone(Some(day(0)), today), ReminderTone::Polite);
        assert_eq!(compute_tone(Some(day(-2)), today), ReminderTone::Polite);
        assert_eq!(
            compute_tone(Some(day(-3)), today),
            ReminderTone::Professional
        );
        assert_eq!(
            compute_tone(Some(day(-5)), today),
            ReminderTone::Professional
        );
        assert_eq!(
            compute_tone(Some(day(-6)), today),
            ReminderTone::Professional
        );
        assert_eq!(compute_tone(Some(day(-7)), today), ReminderTone::Firm);
        assert_eq!(compute_tone(Some(day(-10)), today), ReminderTone::Firm);
    }

    #[test]
    fn tone_for_future_due_date_is_polite() {
        let today = day(0);
        assert_eq!(compute_tone(Some(day(5)), today), ReminderTone::Polite);
        assert_eq!(compute_tone(Some(day(30)), today), ReminderTone::Polite);
    }

    #[test]
    fn prompt_carries_invoice_details() {
        let due = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
        let prompt = build_reminder_prompt(&invoice_due(Some(due)), ReminderTone::Firm);

        assert!(prompt.contains("Tone: firm"));
        assert!(prompt.contains("Payment Reminder — Invoice INV-0042"));
        assert!(prompt.contains("Due Date: 2025-03-20"));
        assert!(prompt.contains("Amount: ₹198.00"));
        assert!(prompt.contains("Client: Acme Corp"));
    }

    #[test]
    fn prompt_uses_placeholders_for_missing_fields() {
        let mut invoice = invoice_due(None);
        invoice.client.name = "  ".to_string();

        let prompt = build_reminder_prompt(&invoice, ReminderTone::Polite);

        assert!(prompt.contains("Due Date: N/A"));
        assert!(prompt.contains("Client: Client"));
    }

    #[test]
    fn reply_parsing_accepts_wrapped_json() {
        assert_eq!(
            parse_reminder_reply(r#"{"message": "Hello"}"#).as_deref(),
            Some("Hello")
        );
        assert_eq!(
            parse_reminder_reply(r#"Here you go: {"message": "Hello"} enjoy"#).as_deref(),
            Some("Hello")
        );
    }

    #[test]
    fn reply_parsing_rejects_blank_or_missing_message() {
        assert!(parse_reminder_reply(r#"{"message": "   "}"#).is_none());
        assert!(parse_reminder_reply(r#"{"text": "Hello"}"#).is_none());
        assert!(parse_reminder_reply("not json at all").is_none());
    }

    #[tokio::test]
    async fn generates_reminder_from_model_reply() {
        let provider =
            MockChatProvider::with_responses([r#"{"message": "Dear Acme, please pay."}"#]);
        let invoice = invoice_due(Some(day(-10)));

        let reminder = generate_reminder(&provider, &invoice).await.unwrap();

        assert_eq!(reminder.message, "Dear Acme, please pay.");
        assert_eq!(reminder.tone, ReminderTone::Firm);
    }

    #[tokio::test]
    async fn unparseable_reply_fails_generation() {
        let provider = MockChatProvider::with_responses(["I cannot produce JSON today."]);
        let invoice = invoice_due(None);

        let err = generate_reminder(&provider, &invoice).await.unwrap_err();

        assert!(matches!(err, AppError::BadGateway(_)));
    }
}
