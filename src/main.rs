//! Studychunk Service - Main Entry Point
//!
//! Document chunking and retrieval backend for an AI study assistant.

use anyhow::Result;
use axum::{
    routing::{delete, get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use studychunk::api::handlers::{self, AppState};
use studychunk::generation::{GenerationService, HttpGenerationClient};
use studychunk::pipeline::DocumentProcessor;
use studychunk::store::DocumentStore;
use studychunk::types::ServiceConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "studychunk=info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load and validate configuration; a bad chunk size or overlap must
    // stop the service here, not surface mid-upload.
    dotenvy::dotenv().ok();
    let config = ServiceConfig::from_env();
    config.validate()?;

    info!("Starting Studychunk Service v{}", env!("CARGO_PKG_VERSION"));
    info!(
        chunk_size = config.chunking.chunk_size,
        overlap = config.chunking.overlap,
        top_k = config.retrieval.top_k,
        "Loaded configuration"
    );

    // Initialize components
    let store = Arc::new(DocumentStore::new());
    let processor = Arc::new(DocumentProcessor::new(Arc::clone(&store), config.chunking));

    let generation: Option<Arc<dyn GenerationService>> = match &config.generation_service_url {
        Some(url) => {
            info!(url = %url, "Generation service configured");
            Some(Arc::new(HttpGenerationClient::new(url)))
        }
        None => {
            info!("No generation service configured; AI routes will return 503");
            None
        }
    };

    let state = Arc::new(AppState {
        store,
        processor,
        generation,
        config,
    });

    // Build HTTP routes
    let app = Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Documents
        .route("/documents", post(handlers::ingest_document))
        .route("/documents", get(handlers::list_documents))
        .route("/documents/:document_id", get(handlers::get_document))
        .route("/documents/:document_id", delete(handlers::delete_document))
        .route(
            "/documents/:document_id/chunks",
            get(handlers::get_document_chunks),
        )
        // AI
        .route("/ai/chat", post(handlers::chat))
        .route("/ai/explain", post(handlers::explain_concept))
        .route("/ai/summary", post(handlers::summarize))
        .route("/ai/flashcards", post(handlers::generate_flashcards))
        .route("/ai/quiz", post(handlers::generate_quiz))
        // State
        .with_state(state)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // Start server
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
