use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use tracing::info;

use super::{EndpointsInfo, ServiceInfo, SpeakBody, TranslateBody, TranslateResponse};
use crate::api::routes::AppState;
use crate::error::AppError;
use crate::languages::{self, LanguageEntry};
use crate::translate::{preview, Translation};
use crate::tts::SynthesizedAudio;

pub const X_AUDIO_SIZE: HeaderName = HeaderName::from_static("x-audio-size");
pub const X_AUDIO_LANGUAGE: HeaderName = HeaderName::from_static("x-audio-language");
pub const X_LANGUAGE_NAME: HeaderName = HeaderName::from_static("x-language-name");
pub const X_WAS_TRANSLATED: HeaderName = HeaderName::from_static("x-was-translated");
pub const X_TRANSLATED_TEXT: HeaderName = HeaderName::from_static("x-translated-text");
pub const X_TRANSLATION_METHOD: HeaderName = HeaderName::from_static("x-translation-method");

const DEMO_PAGE: &str = include_str!("../../static/index.html");

/// Audio plus the translation metadata that travels with it as headers.
#[derive(Debug)]
pub struct SynthesisResult {
    pub audio: SynthesizedAudio,
    pub language: String,
    pub translation: Option<Translation>,
}

impl SynthesisResult {
    pub fn was_translated(&self) -> bool {
        self.translation
            .as_ref()
            .map(Translation::was_translated)
            .unwrap_or(false)
    }

    /// Percent-encoded so non-ASCII text survives as a header value.
    pub fn encoded_translation(&self) -> String {
        match &self.translation {
            Some(t) if t.was_translated() => urlencoding::encode(&t.text).into_owned(),
            _ => String::new(),
        }
    }

    fn method(&self) -> &'static str {
        self.translation
            .as_ref()
            .map(|t| t.method.as_str())
            .unwrap_or("none")
    }

    fn into_http_response(self) -> Result<Response, AppError> {
        let size = self.audio.bytes.len().to_string();
        let was_translated = self.was_translated().to_string();
        let translated = self.encoded_translation();
        let method = self.method();

        Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, &self.audio.content_type)
            .header(header::CONTENT_LENGTH, &size)
            .header(header::CACHE_CONTROL, "no-cache")
            .header(X_AUDIO_SIZE, &size)
            .header(X_AUDIO_LANGUAGE, &self.language)
            .header(X_LANGUAGE_NAME, languages::english_name(&self.language))
            .header(X_WAS_TRANSLATED, was_translated)
            .header(X_TRANSLATED_TEXT, translated)
            .header(X_TRANSLATION_METHOD, method)
            .body(Body::from(self.audio.bytes))
            .map_err(|e| AppError::Internal(format!("Failed to build audio response: {}", e)))
    }
}

pub async fn synthesize(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, AppError> {
    let request = serde_json::from_slice::<SpeakBody>(&body)?.validate(&state.source_lang)?;

    let translation = if request.translate && request.target != request.source {
        Some(
            state
                .translator
                .resolve(
                    &request.text,
                    &request.target,
                    &request.source,
                    request.ai_config.as_ref(),
                )
                .await,
        )
    } else {
        None
    };

    let final_text = translation
        .as_ref()
        .map(|t| t.text.as_str())
        .unwrap_or(request.text.as_str());

    let audio = state.tts.synthesize(final_text, &request.target).await?;

    SynthesisResult {
        audio,
        language: request.target,
        translation,
    }
    .into_http_response()
}

pub async fn translate(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<TranslateResponse>, AppError> {
    let request = serde_json::from_slice::<TranslateBody>(&body)?.validate(&state.source_lang)?;

    let translation = state
        .translator
        .resolve(
            &request.text,
            &request.target,
            &request.source,
            request.ai_config.as_ref(),
        )
        .await;

    info!(
        "Translation result ({}): {}",
        translation.method.as_str(),
        preview(&translation.text)
    );

    Ok(Json(TranslateResponse {
        original_text: request.text,
        translated_text: translation.text,
        target_lang: request.target,
        method: translation.method,
    }))
}

pub async fn list_languages() -> Json<BTreeMap<&'static str, &'static LanguageEntry>> {
    Json(languages::LANGUAGES.iter().map(|l| (l.code, l)).collect())
}

pub async fn demo_page() -> Html<&'static str> {
    Html(DEMO_PAGE)
}

pub async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: "TTS Proxy with Optional AI Translation",
        version: env!("CARGO_PKG_VERSION"),
        languages: languages::LANGUAGES.len(),
        features: vec![
            "text-to-speech",
            "fallback-translation",
            "custom-ai-translation",
            "multi-language-support",
        ],
        endpoints: EndpointsInfo {
            tts: "POST /",
            translate: "POST /translate",
            languages: "GET /languages",
        },
        supported_languages: languages::supported_codes(),
    })
}

/// Anything not matched by a route: GET describes the service, POST synthesizes.
pub async fn fallback(
    state: State<Arc<AppState>>,
    method: Method,
    body: Bytes,
) -> Result<Response, AppError> {
    match method {
        Method::GET | Method::HEAD => Ok(service_info().await.into_response()),
        Method::POST => synthesize(state, body).await,
        _ => Err(AppError::MethodNotAllowed),
    }
}
