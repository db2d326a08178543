//! PDF export integration tests, running against the mock renderer.

mod common;

use common::TestApp;
use serde_json::{json, Value};
use uuid::Uuid;

fn document_body(client_name: &str) -> Value {
    json!({
        "issueDate": "2026-08-01",
        "client": { "name": client_name },
        "items": [{ "name": "Design work", "qty": 1, "rate": 5000, "taxPercent": 18 }]
    })
}

async fn save_profile(app: &TestApp) {
    let response = app
        .put("/api/profile", &json!({ "companyName": "Studio North" }))
        .await;
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn create_pdf_requires_business_profile() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let response = app
        .post("/api/documents/create-pdf", &document_body("Acme Corp"))
        .await;
    assert_eq!(response.status().as_u16(), 400);

    let parsed: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(parsed["error"], "Business profile not found");

    // The failed request must not have created a document.
    let listed: Value = app
        .get("/api/documents")
        .await
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(listed["documents"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn create_pdf_persists_document_and_returns_bytes() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    save_profile(&app).await;

    let response = app
        .post("/api/documents/create-pdf", &document_body("Acme Corp"))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert_eq!(content_type, "application/pdf");

    let disposition = response
        .headers()
        .get("content-disposition")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert_eq!(disposition, "attachment; filename=\"INVOICE-INV-0001.pdf\"");

    let invoice_id = response
        .headers()
        .get("x-invoice-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let invoice_id = Uuid::parse_str(&invoice_id).expect("x-invoice-id should be a UUID");

    let pdf = response.bytes().await.expect("Failed to read body");
    assert!(pdf.starts_with(b"%PDF"));

    // The document landed in the list and is fetchable by the echoed id.
    let fetched: Value = app
        .get(&format!("/api/documents/{}", invoice_id))
        .await
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(fetched["document"]["documentNumber"], "INV-0001");
}

#[tokio::test]
async fn download_pdf_names_file_after_client() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    save_profile(&app).await;

    let created: Value = app
        .post("/api/documents", &document_body("Acme Corp Ltd"))
        .await
        .json()
        .await
        .expect("Failed to parse response");
    let id = created["document"]["id"].as_str().expect("missing id");

    let response = app.get(&format!("/api/documents/{}/pdf", id)).await;
    assert_eq!(response.status().as_u16(), 200);

    let disposition = response
        .headers()
        .get("content-disposition")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert_eq!(
        disposition,
        "attachment; filename=\"INVOICE-Acme_Corp_Ltd-INV-0001.pdf\""
    );

    let pdf = response.bytes().await.expect("Failed to read body");
    assert!(pdf.starts_with(b"%PDF"));
}

#[tokio::test]
async fn download_pdf_without_profile_is_rejected() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let created: Value = app
        .post("/api/documents", &document_body("Acme Corp"))
        .await
        .json()
        .await
        .expect("Failed to parse response");
    let id = created["document"]["id"].as_str().expect("missing id");

    let response = app.get(&format!("/api/documents/{}/pdf", id)).await;
    assert_eq!(response.status().as_u16(), 400);

    let parsed: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(parsed["error"], "Business profile not found");
}
