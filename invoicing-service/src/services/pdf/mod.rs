//! PDF rendering backends.
//!
//! Rendering is trait-based so handlers stay independent of the backend:
//! headless Chromium in production, an in-process mock for tests.

pub mod chromium;
pub mod html;
pub mod mock;

pub use chromium::ChromiumRenderer;
pub use mock::MockPdfRenderer;

use async_trait::async_trait;
use service_core::error::AppError;
use thiserror::Error;

/// Error type for rendering operations.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to launch browser: {0}")]
    Launch(String),

    #[error("Rendering failed: {0}")]
    Render(String),

    #[error("Rendering timed out after {0}s")]
    Timeout(u64),
}

impl From<RenderError> for AppError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Timeout(_) => {
                AppError::UpstreamTimeout("PDF rendering timed out".to_string())
            }
            RenderError::Launch(_) | RenderError::Render(_) => {
                AppError::BadGateway("PDF generation failed".to_string())
            }
        }
    }
}

/// Trait for PDF rendering backends.
#[async_trait]
pub trait PdfRenderer: Send + Sync {
    /// Render an HTML document to PDF bytes.
    async fn render(&self, html: &str) -> Result<Vec<u8>, RenderError>;
}
