use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use crate::config::Config;
use crate::translate::Translator;
use crate::tts::TtsForwarder;

pub struct AppState {
    pub translator: Translator,
    pub tts: TtsForwarder,
    /// Language assumed for input text when a request doesn't say.
    pub source_lang: String,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        let client = reqwest::Client::new();
        Self {
            translator: Translator::new(
                client.clone(),
                config.fallback_translate_url.clone(),
                config.libretranslate_url.clone(),
            ),
            tts: TtsForwarder::new(
                client,
                config.tts_backend_url.clone(),
                config.tts_referer.clone(),
            ),
            source_lang: config.source_lang.clone(),
        }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    // Preflight (any OPTIONS) is answered here with an empty body
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .expose_headers([
            handlers::X_AUDIO_SIZE,
            handlers::X_AUDIO_LANGUAGE,
            handlers::X_LANGUAGE_NAME,
            handlers::X_WAS_TRANSLATED,
            handlers::X_TRANSLATED_TEXT,
            handlers::X_TRANSLATION_METHOD,
        ]);

    Router::new()
        .route(
            "/",
            get(handlers::demo_page)
                .post(handlers::synthesize)
                .fallback(handlers::fallback),
        )
        .route(
            "/languages",
            get(handlers::list_languages).fallback(handlers::fallback),
        )
        .route(
            "/translate",
            post(handlers::translate).fallback(handlers::fallback),
        )
        .fallback(handlers::fallback)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
