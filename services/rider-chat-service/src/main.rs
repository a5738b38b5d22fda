// Main Entry Point untuk Rider Chat Service
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod chat;
mod config;
mod domain;
mod error;
mod handlers;
mod middleware;
mod repositories;
mod routes;
mod store;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rider_chat_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("💬 Starting Rider Chat Service");

    let config = config::AppConfig::from_env()
        .map_err(|e| format!("Failed to load configuration: {}", e))?;
    let state = config::AppState::new(config)
        .map_err(|e| format!("Failed to initialize app state: {}", e))?;
    tracing::info!("✅ Application state initialized");

    // Store health check, service tetap jalan kalau store belum siap
    match state.store.ping().await {
        Ok(()) => tracing::info!("✅ {} store connection healthy", state.store.backend_name()),
        Err(e) => tracing::warn!(
            "⚠️ {} store belum bisa diakses: {}",
            state.store.backend_name(),
            e
        ),
    }

    tracing::info!("🌍 Environment: {}", state.config.environment);
    if state.config.is_production() {
        tracing::warn!("🚨 Running in PRODUCTION mode");
    } else {
        tracing::info!("🧪 Running in DEVELOPMENT mode");
    }

    let addr = state.config.bind_address();
    let app = routes::create_router(state)?;

    tracing::info!("🎯 Rider Chat Service listening on {}", addr);
    tracing::info!("📚 Swagger UI: http://{}/docs", addr);
    tracing::info!("   Health Check: http://{}/health", addr);

    // Graceful shutdown setup
    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
        }
        tracing::info!("🛑 Received shutdown signal");
    };

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    tracing::info!("👋 Rider Chat Service shutdown complete");

    Ok(())
}
