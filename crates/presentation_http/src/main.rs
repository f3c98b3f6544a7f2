//! Fablecast HTTP Server
//!
//! Main entry point for the HTTP API server.

use std::{sync::Arc, time::Duration};

use application::{BookService, QuestionService};
use infrastructure::{AppConfig, FsMediaStore, InferenceAdapter, SpeechAdapter};
use presentation_http::{routes, spawn_audio_cleanup_task, state::AppState};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fablecast_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("📖 Fablecast v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load and validate configuration
    let config = AppConfig::load().map_err(|e| anyhow::anyhow!("Failed to load config: {e}"))?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    info!(
        host = %config.server.host,
        port = %config.server.port,
        model = %config.inference.default_model,
        voice = %config.speech.default_voice,
        media_dir = %config.storage.media_dir,
        "Configuration loaded"
    );

    // Initialize adapters
    let inference: Arc<dyn application::ports::InferencePort> =
        Arc::new(InferenceAdapter::new(config.inference.clone())
            .map_err(|e| anyhow::anyhow!("Failed to initialize inference: {e}"))?);
    let speech: Arc<dyn application::ports::SpeechPort> =
        Arc::new(SpeechAdapter::new(config.speech.clone())
            .map_err(|e| anyhow::anyhow!("Failed to initialize speech: {e}"))?);

    // Initialize the media store, catching up on removals missed while down
    let media_store = Arc::new(FsMediaStore::new(
        &config.storage.media_dir,
        config.storage.cleanup_ttl_secs,
    ));
    media_store
        .init()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize media store: {e}"))?;
    let removed = media_store
        .sweep_expired()
        .await
        .map_err(|e| anyhow::anyhow!("Startup media sweep failed: {e}"))?;
    if removed > 0 {
        info!(removed, "Removed media files that expired while down");
    }

    let cleanup_handle = spawn_audio_cleanup_task(
        Arc::clone(&media_store),
        Duration::from_secs(config.storage.sweep_interval_secs),
    );

    let media_store_port: Arc<dyn application::ports::MediaStorePort> =
        Arc::clone(&media_store) as _;

    // Initialize services
    let question_service = QuestionService::new(
        Arc::clone(&speech),
        Arc::clone(&inference),
        config.prompts.system_prompt.clone(),
    );
    let book_service = BookService::new(
        Arc::clone(&inference),
        speech,
        Arc::clone(&media_store_port),
        config.prompts.toc_prompt.clone(),
        config.storage.synthesis_concurrency,
    );

    let config = Arc::new(config);
    let state = AppState {
        question_service: Arc::new(question_service),
        book_service: Arc::new(book_service),
        media_store: media_store_port,
        config: Arc::clone(&config),
    };

    // Build router
    let app = routes::create_router(state);

    // Configure CORS layer
    let cors_layer = if config.server.allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use axum::http::{HeaderValue, Method};
        let origins: Vec<HeaderValue> = config
            .server
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any)
    };

    let app = if config.server.cors_enabled {
        app.layer(TraceLayer::new_for_http()).layer(cors_layer)
    } else {
        app.layer(TraceLayer::new_for_http())
    };

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("🚀 Server listening on http://{}", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    cleanup_handle.abort();
    info!("👋 Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("Waiting up to {:?} for connections to close...", timeout);
    // Connection draining is handled by axum's graceful_shutdown
}
