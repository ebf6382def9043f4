use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod error;
mod languages;
mod translate;
mod tts;

use api::routes::{create_router, AppState};
use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("TTS Translate Proxy v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Starting server on http://{}", config.addr);
    tracing::info!("TTS backend: {}", config.tts_backend_url);
    tracing::info!("Source language: {}", config.source_lang);
    if let Some(url) = &config.libretranslate_url {
        tracing::info!("LibreTranslate fallback: {}", url);
    }

    let state = Arc::new(AppState::from_config(&config));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
