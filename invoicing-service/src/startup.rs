use crate::config::{AiProvider, InvoicingConfig, PdfBackend};
use crate::handlers;
use crate::middleware::track_metrics;
use crate::services::ai::providers::{GroqConfig, GroqProvider, MockChatProvider};
use crate::services::ai::ChatProvider;
use crate::services::pdf::{ChromiumRenderer, MockPdfRenderer, PdfRenderer};
use crate::services::Database;
use axum::{
    middleware::from_fn,
    routing::{get, patch, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::request_id_middleware;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: InvoicingConfig,
    pub db: Database,
    pub pdf: Arc<dyn PdfRenderer>,
    pub chat: Arc<dyn ChatProvider>,
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
    state: AppState,
}

impl Application {
    pub async fn build(config: InvoicingConfig) -> Result<Self, AppError> {
        let db = Database::new(
            &config.database.url,
            config.database.max_connections,
            config.database.min_connections,
        )
        .await
        .map_err(|e| {
            tracing::error!("Failed to connect to Postgres: {}", e);
            e
        })?;
        db.run_migrations().await.map_err(|e| {
            tracing::error!("Failed to run database migrations: {}", e);
            e
        })?;

        let pdf: Arc<dyn PdfRenderer> = match config.pdf.backend {
            PdfBackend::Chromium => {
                tracing::info!("Chromium PDF renderer initialized");
                Arc::new(ChromiumRenderer::new(
                    config.pdf.chrome_path.clone(),
                    config.pdf.timeout_secs,
                ))
            }
            PdfBackend::Mock => {
                tracing::info!("PDF backend set to mock, using mock renderer");
                Arc::new(MockPdfRenderer::new(true))
            }
        };

        let chat: Arc<dyn ChatProvider> = match config.ai.provider {
            AiProvider::Groq => {
                tracing::info!("Groq chat provider initialized");
                Arc::new(GroqProvider::new(GroqConfig {
                    api_key: config.ai.api_key.clone(),
                    model: config.ai.model.clone(),
                    base_url: config.ai.base_url.clone(),
                    timeout_secs: config.ai.timeout_secs,
                }))
            }
            AiProvider::Mock => {
                tracing::info!("AI provider set to mock, using mock chat provider");
                Arc::new(MockChatProvider::new(true))
            }
        };

        let state = AppState {
            config: config.clone(),
            db: db.clone(),
            pdf,
            chat,
        };

        let api = Router::new()
            .route(
                "/documents",
                post(handlers::create_document).get(handlers::list_documents),
            )
            .route("/documents/create-pdf", post(handlers::create_document_pdf))
            .route("/documents/:id", get(handlers::get_document))
            .route(
                "/documents/:id/status",
                patch(handlers::set_document_status),
            )
            .route("/documents/:id/pdf", get(handlers::download_document_pdf))
            .route(
                "/profile",
                get(handlers::get_profile).put(handlers::upsert_profile),
            )
            .route("/profile/exists", get(handlers::profile_exists))
            .route(
                "/items",
                post(handlers::create_item).get(handlers::list_items),
            )
            .route(
                "/items/:id",
                get(handlers::get_item)
                    .put(handlers::update_item)
                    .delete(handlers::delete_item),
            )
            .route(
                "/ai/documents/:id/reminder",
                post(handlers::generate_reminder),
            )
            .route("/ai/rewrite-items", post(handlers::rewrite_items));

        let app = Router::new()
            .route("/health", get(handlers::health_check))
            .route("/ready", get(handlers::readiness_check))
            .route("/metrics", get(handlers::metrics_endpoint))
            .nest("/api", api)
            // Add metrics middleware
            .layer(from_fn(track_metrics))
            // Add tracing layer
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                    let request_id = request
                        .headers()
                        .get("x-request-id")
                        .and_then(|value| value.to_str().ok())
                        .unwrap_or("-");

                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id,
                        owner_id = tracing::field::Empty,
                        method = %request.method(),
                        uri = %request.uri(),
                        version = ?request.version(),
                    )
                }),
            )
            // Add tracing middleware for request_id
            .layer(from_fn(request_id_middleware))
            // Add CORS layer
            .layer(CorsLayer::permissive())
            .with_state(state.clone());

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
            state,
        })
    }

    pub fn db(&self) -> &Database {
        &self.state.db
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
