use crate::dtos::{
    CreateInvoiceRequest, DocumentListResponse, DocumentResponse, InvoiceResponse,
    ListDocumentsParams, SetStatusRequest,
};
use crate::middleware::OwnerId;
use crate::models::{Invoice, InvoiceStatus, StatusFilter};
use crate::services::metrics::ERRORS_TOTAL;
use crate::services::pdf::html::build_invoice_html;
use crate::startup::AppState;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderName, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use service_core::error::AppError;
use uuid::Uuid;
use validator::Validate;

pub async fn create_document(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Json(payload): Json<CreateInvoiceRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let invoice = state
        .db
        .create_invoice(&payload.into_create_invoice(owner_id))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(DocumentResponse {
            document: InvoiceResponse::from(invoice),
        }),
    ))
}

/// Create an invoice and stream its PDF back in one round trip. The profile
/// check runs first so a missing profile never burns a document number.
pub async fn create_document_pdf(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Json(payload): Json<CreateInvoiceRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let profile = state
        .db
        .get_business_profile(owner_id)
        .await?
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("Business profile not found")))?;

    let invoice = state
        .db
        .create_invoice(&payload.into_create_invoice(owner_id))
        .await?;

    let pdf = render_pdf(&state, &invoice, &profile).await?;
    let filename = sanitize_filename(&format!("INVOICE-{}.pdf", invoice.document_number));

    tracing::info!(
        invoice_id = %invoice.invoice_id,
        document_number = %invoice.document_number,
        size = pdf.len(),
        "Invoice created and rendered"
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
            (
                HeaderName::from_static("x-invoice-id"),
                invoice.invoice_id.to_string(),
            ),
        ],
        pdf,
    ))
}

pub async fn list_documents(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Query(params): Query<ListDocumentsParams>,
) -> Result<impl IntoResponse, AppError> {
    let filter = StatusFilter::from_query(params.status.as_deref());
    let (invoices, summary) = state.db.list_invoices(owner_id, filter).await?;

    Ok(Json(DocumentListResponse {
        documents: invoices.into_iter().map(InvoiceResponse::from).collect(),
        summary: summary.into(),
    }))
}

pub async fn get_document(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Path(document_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = state.db.get_invoice(owner_id, document_id).await?;

    Ok(Json(DocumentResponse {
        document: InvoiceResponse::from(invoice),
    }))
}

pub async fn set_document_status(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Path(document_id): Path<Uuid>,
    Json(payload): Json<SetStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    let status = InvoiceStatus::parse(&payload.status)
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("Invalid status")))?;

    let invoice = state
        .db
        .set_invoice_status(owner_id, document_id, status)
        .await?;

    Ok(Json(DocumentResponse {
        document: InvoiceResponse::from(invoice),
    }))
}

/// Render a stored invoice as a PDF download.
pub async fn download_document_pdf(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Path(document_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = state.db.get_invoice(owner_id, document_id).await?;

    let profile = state
        .db
        .get_business_profile(owner_id)
        .await?
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("Business profile not found")))?;

    let pdf = render_pdf(&state, &invoice, &profile).await?;

    let client = if invoice.client.name.is_empty() {
        "Client"
    } else {
        invoice.client.name.as_str()
    };
    let filename = format!(
        "INVOICE-{}-{}.pdf",
        sanitize_filename(client),
        invoice.document_number
    );

    tracing::info!(
        invoice_id = %invoice.invoice_id,
        size = pdf.len(),
        "Invoice PDF downloaded"
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        pdf,
    ))
}

async fn render_pdf(
    state: &AppState,
    invoice: &Invoice,
    profile: &crate::models::BusinessProfile,
) -> Result<Vec<u8>, AppError> {
    let html = build_invoice_html(invoice, profile);
    state.pdf.render(&html).await.map_err(|e| {
        tracing::warn!(invoice_id = %invoice.invoice_id, error = %e, "PDF render failed");
        ERRORS_TOTAL.with_label_values(&["pdf_error"]).inc();
        AppError::from(e)
    })
}

/// Collapse whitespace runs to underscores so the name survives a
/// Content-Disposition header.
fn sanitize_filename(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join("_")
}
