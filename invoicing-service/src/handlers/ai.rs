use crate::dtos::{RewriteItemsRequest, RewriteItemsResponse};
use crate::middleware::OwnerId;
use crate::services::ai;
use crate::services::metrics::{AI_REQUESTS_TOTAL, ERRORS_TOTAL};
use crate::startup::AppState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use service_core::error::AppError;
use uuid::Uuid;
use validator::Validate;

/// Draft a payment reminder for a stored invoice. The tone is derived from
/// how overdue the invoice is; the model only writes the copy.
pub async fn generate_reminder(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Path(document_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = state.db.get_invoice(owner_id, document_id).await?;

    match ai::generate_reminder(state.chat.as_ref(), &invoice).await {
        Ok(reminder) => {
            AI_REQUESTS_TOTAL
                .with_label_values(&["reminder", "ok"])
                .inc();
            Ok(Json(reminder))
        }
        Err(e) => {
            AI_REQUESTS_TOTAL
                .with_label_values(&["reminder", "error"])
                .inc();
            ERRORS_TOTAL.with_label_values(&["ai_error"]).inc();
            Err(e)
        }
    }
}

/// Rewrite draft line-item names into client-ready phrasing. Only names
/// change; quantities and amounts pass through untouched.
pub async fn rewrite_items(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Json(payload): Json<RewriteItemsRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    // The stored company name wins over the caller-supplied hint.
    let business_name = state
        .db
        .get_business_profile(owner_id)
        .await?
        .map(|profile| profile.company_name)
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| payload.business_name.clone());

    let result = ai::rewrite_item_names(
        state.chat.as_ref(),
        &payload.items,
        &business_name,
        &payload.client_name,
        &payload.currency,
    )
    .await;

    match result {
        Ok(items) => {
            AI_REQUESTS_TOTAL
                .with_label_values(&["rewrite", "ok"])
                .inc();
            Ok(Json(RewriteItemsResponse { items }))
        }
        Err(e) => {
            AI_REQUESTS_TOTAL
                .with_label_values(&["rewrite", "error"])
                .inc();
            ERRORS_TOTAL.with_label_values(&["ai_error"]).inc();
            Err(e)
        }
    }
}
