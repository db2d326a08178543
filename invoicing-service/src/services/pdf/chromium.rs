//! Chromium-backed PDF rendering over the DevTools protocol.

use super::{PdfRenderer, RenderError};
use crate::services::metrics::PDF_RENDER_DURATION;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, instrument};

/// Loads the document as a base64 data URL in a fresh headless Chromium
/// and prints the page to PDF. Each render launches its own browser, so
/// a crashed render cannot poison later ones.
pub struct ChromiumRenderer {
    chrome_path: Option<String>,
    timeout_secs: u64,
}

impl ChromiumRenderer {
    pub fn new(chrome_path: Option<String>, timeout_secs: u64) -> Self {
        Self {
            chrome_path,
            timeout_secs,
        }
    }

    /// A4 portrait, print backgrounds on, 10mm vertical and 12mm
    /// horizontal margins. DevTools takes inches.
    fn pdf_options() -> PrintToPdfOptions {
        PrintToPdfOptions {
            landscape: Some(false),
            print_background: Some(true),
            paper_width: Some(8.27),
            paper_height: Some(11.69),
            margin_top: Some(0.39),
            margin_bottom: Some(0.39),
            margin_left: Some(0.47),
            margin_right: Some(0.47),
            prefer_css_page_size: Some(false),
            ..Default::default()
        }
    }

    fn render_blocking(chrome_path: Option<String>, html: &str) -> Result<Vec<u8>, RenderError> {
        let mut builder = LaunchOptions::default_builder();
        builder.headless(true).sandbox(false);
        if let Some(path) = chrome_path {
            builder.path(Some(PathBuf::from(path)));
        }
        let options = builder
            .build()
            .map_err(|e| RenderError::Launch(e.to_string()))?;

        let browser = Browser::new(options).map_err(|e| RenderError::Launch(e.to_string()))?;
        let tab = browser
            .new_tab()
            .map_err(|e| RenderError::Render(e.to_string()))?;

        let url = format!("data:text/html;base64,{}", BASE64.encode(html));
        tab.navigate_to(&url)
            .map_err(|e| RenderError::Render(e.to_string()))?;
        tab.wait_until_navigated()
            .map_err(|e| RenderError::Render(e.to_string()))?;

        tab.print_to_pdf(Some(Self::pdf_options()))
            .map_err(|e| RenderError::Render(e.to_string()))
    }
}

#[async_trait]
impl PdfRenderer for ChromiumRenderer {
    #[instrument(skip(self, html), fields(html_bytes = html.len()))]
    async fn render(&self, html: &str) -> Result<Vec<u8>, RenderError> {
        let timer = PDF_RENDER_DURATION.start_timer();

        let chrome_path = self.chrome_path.clone();
        let html = html.to_string();
        let task = tokio::task::spawn_blocking(move || Self::render_blocking(chrome_path, &html));

        // On timeout the blocking task keeps running until Chromium exits;
        // dropping the join handle detaches it.
        let pdf = match tokio::time::timeout(Duration::from_secs(self.timeout_secs), task).await {
            Ok(Ok(result)) => result?,
            Ok(Err(join_err)) => return Err(RenderError::Render(join_err.to_string())),
            Err(_) => return Err(RenderError::Timeout(self.timeout_secs)),
        };

        timer.observe_duration();
        debug!(pdf_bytes = pdf.len(), "PDF rendered");
        Ok(pdf)
    }
}
