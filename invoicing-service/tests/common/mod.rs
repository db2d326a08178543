//! Common test utilities for invoicing-service integration tests.
//!
//! Tests run the full application on an ephemeral port against the
//! database named by `TEST_DATABASE_URL`, with the PDF and AI backends
//! mocked. Each test uses a fresh owner id, so suites stay independent
//! without wiping tables between runs.

#![allow(dead_code)]

use invoicing_service::config::{
    AiConfig, AiProvider, DatabaseConfig, InvoicingConfig, PdfBackend, PdfConfig,
};
use invoicing_service::startup::Application;
use reqwest::{Client, Method, Response};
use serde_json::Value;
use uuid::Uuid;

/// A running application instance plus the owner identity stamped on
/// every request.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub owner_id: Uuid,
}

impl TestApp {
    /// Spawn the application, or log and return `None` when
    /// `TEST_DATABASE_URL` is unset so the suite skips cleanly on
    /// machines without Postgres.
    pub async fn spawn() -> Option<TestApp> {
        let db_url = match std::env::var("TEST_DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                eprintln!("Skipping integration test (TEST_DATABASE_URL is not set)");
                return None;
            }
        };

        let config = InvoicingConfig {
            common: service_core::config::Config {
                port: 0,
                log_level: "info".to_string(),
            },
            database: DatabaseConfig {
                url: db_url,
                max_connections: 5,
                min_connections: 1,
            },
            pdf: PdfConfig {
                backend: PdfBackend::Mock,
                chrome_path: None,
                timeout_secs: 20,
            },
            ai: AiConfig {
                provider: AiProvider::Mock,
                api_key: String::new(),
                model: "llama-3.3-70b-versatile".to_string(),
                base_url: String::new(),
                timeout_secs: 30,
            },
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build application");
        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(app.run_until_stopped());

        Some(TestApp {
            address,
            client: Client::new(),
            owner_id: Uuid::new_v4(),
        })
    }

    pub async fn post(&self, path: &str, body: &Value) -> Response {
        self.request(Method::POST, path, self.owner_id)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// POST as a different owner, for isolation checks.
    pub async fn post_as(&self, owner_id: Uuid, path: &str, body: &Value) -> Response {
        self.request(Method::POST, path, owner_id)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get(&self, path: &str) -> Response {
        self.request(Method::GET, path, self.owner_id)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// GET as a different owner, for isolation checks.
    pub async fn get_as(&self, owner_id: Uuid, path: &str) -> Response {
        self.request(Method::GET, path, owner_id)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn put(&self, path: &str, body: &Value) -> Response {
        self.request(Method::PUT, path, self.owner_id)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn patch(&self, path: &str, body: &Value) -> Response {
        self.request(Method::PATCH, path, self.owner_id)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete(&self, path: &str) -> Response {
        self.request(Method::DELETE, path, self.owner_id)
            .send()
            .await
            .expect("Failed to execute request")
    }

    fn request(&self, method: Method, path: &str, owner_id: Uuid) -> reqwest::RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.address, path))
            .header("X-User-ID", owner_id.to_string())
    }
}
