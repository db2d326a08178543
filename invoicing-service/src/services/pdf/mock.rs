//! Mock PDF renderer for testing.

use super::{PdfRenderer, RenderError};
use async_trait::async_trait;

/// Mock renderer that returns a minimal valid PDF header without
/// launching a browser.
pub struct MockPdfRenderer {
    enabled: bool,
}

impl MockPdfRenderer {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

#[async_trait]
impl PdfRenderer for MockPdfRenderer {
    async fn render(&self, html: &str) -> Result<Vec<u8>, RenderError> {
        if !self.enabled {
            return Err(RenderError::Launch(
                "Mock PDF renderer not enabled".to_string(),
            ));
        }

        let mut pdf = b"%PDF-1.4\n%mock\n".to_vec();
        pdf.extend_from_slice(format!("% {} source bytes\n", html.len()).as_bytes());
        pdf.extend_from_slice(b"%%EOF\n");
        Ok(pdf)
    }
}
