pub mod ai;
pub mod fallback;

use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info, warn};

pub use ai::AiProviderConfig;

/// Which provider produced a translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TranslationMethod {
    #[serde(rename = "AI")]
    Ai,
    Fallback,
    #[serde(rename = "none")]
    None,
}

impl TranslationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranslationMethod::Ai => "AI",
            TranslationMethod::Fallback => "Fallback",
            TranslationMethod::None => "none",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub text: String,
    pub method: TranslationMethod,
}

impl Translation {
    fn untranslated(text: &str) -> Self {
        Self {
            text: text.to_string(),
            method: TranslationMethod::None,
        }
    }

    pub fn was_translated(&self) -> bool {
        self.method != TranslationMethod::None
    }
}

/// Provider failures. These never leave the resolver; each one advances the chain.
#[derive(thiserror::Error, Debug)]
pub enum TranslationError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned HTTP {0}")]
    Status(u16),

    #[error("provider returned no usable text")]
    EmptyResult,
}

pub struct Translator {
    client: Client,
    fallback_url: String,
    libretranslate_url: Option<String>,
}

impl Translator {
    pub fn new(client: Client, fallback_url: String, libretranslate_url: Option<String>) -> Self {
        Self {
            client,
            fallback_url,
            libretranslate_url,
        }
    }

    /// Translate `text` from `source` to `target`, falling back from the AI
    /// provider to the public endpoints and finally to the original text.
    /// Codes are expected to be normalized already.
    pub async fn resolve(
        &self,
        text: &str,
        target: &str,
        source: &str,
        ai_config: Option<&AiProviderConfig>,
    ) -> Translation {
        if target == source || text.trim().is_empty() {
            return Translation::untranslated(text);
        }

        debug!("Translating {} -> {}: {}", source, target, preview(text));

        if let Some(config) = ai_config {
            match ai::translate(&self.client, config, text, target, source).await {
                Ok(translated) => {
                    info!("AI translation successful ({})", config.model_name);
                    return Translation {
                        text: translated,
                        method: TranslationMethod::Ai,
                    };
                }
                Err(e) => warn!("AI translation failed, falling back: {}", e),
            }
        }

        match fallback::google(&self.client, &self.fallback_url, text, target, source).await {
            Ok(translated) => {
                info!("Fallback translation successful");
                return Translation {
                    text: translated,
                    method: TranslationMethod::Fallback,
                };
            }
            Err(e) => warn!("Fallback translation failed: {}", e),
        }

        if let Some(url) = &self.libretranslate_url {
            match fallback::libretranslate(&self.client, url, text, target, source).await {
                Ok(translated) => {
                    info!("LibreTranslate translation successful");
                    return Translation {
                        text: translated,
                        method: TranslationMethod::Fallback,
                    };
                }
                Err(e) => warn!("LibreTranslate translation failed: {}", e),
            }
        }

        warn!("All translation providers failed, using original text");
        Translation::untranslated(text)
    }
}

/// First 50 characters, for log lines.
pub fn preview(text: &str) -> String {
    let mut out: String = text.chars().take(50).collect();
    if text.chars().nth(50).is_some() {
        out.push_str("...");
    }
    out
}


#[cfg(test)]
mod tests {
    use super::test_support::{spawn_stub, CountingProviders, STUB_TRANSLATION, UNREACHABLE};
    use super::*;
    use axum::{extract::Query, routing::{get, post}, Json, Router};
    use std::collections::HashMap;

    fn ai_config(endpoint: String) -> AiProviderConfig {
        AiProviderConfig {
            endpoint_url: endpoint,
            api_key: "sk-test".into(),
            model_name: "test-model".into(),
        }
    }

    #[tokio::test]
    async fn same_language_skips_network() {
        let providers = CountingProviders::spawn().await;
        let translator = Translator::new(
            Client::new(),
            providers.google_url(),
            Some(providers.libre_url()),
        );
        let config = ai_config(providers.ai_url());
        for text in ["你好", "hello", ""] {
            let result = translator.resolve(text, "zh", "zh", Some(&config)).await;
            assert_eq!(result, Translation::untranslated(text));
        }
        assert_eq!(providers.hit_count(), 0);
    }

    #[tokio::test]
    async fn empty_text_short_circuits() {
        let providers = CountingProviders::spawn().await;
        let translator = Translator::new(
            Client::new(),
            providers.google_url(),
            Some(providers.libre_url()),
        );
        let config = ai_config(providers.ai_url());
        for text in ["", "   "] {
            let result = translator.resolve(text, "en", "zh", Some(&config)).await;
            assert_eq!(result.method, TranslationMethod::None);
            assert_eq!(result.text, text);
        }
        assert_eq!(providers.hit_count(), 0);
    }

    #[tokio::test]
    async fn counting_providers_do_answer() {
        let providers = CountingProviders::spawn().await;
        let translator = Translator::new(Client::new(), providers.google_url(), None);
        let config = ai_config(providers.ai_url());
        let result = translator.resolve("你好", "en", "zh", Some(&config)).await;
        assert_eq!(result.text, STUB_TRANSLATION);
        assert_eq!(result.method, TranslationMethod::Ai);
        assert_eq!(providers.hit_count(), 1);
    }

    #[tokio::test]
    async fn unreachable_providers_return_original() {
        let translator = Translator::new(
            Client::new(),
            UNREACHABLE.into(),
            Some(UNREACHABLE.into()),
        );
        let config = ai_config(UNREACHABLE.into());
        let result = translator.resolve("你好世界", "en", "zh", Some(&config)).await;
        assert_eq!(result.text, "你好世界");
        assert_eq!(result.method, TranslationMethod::None);
        assert!(!result.was_translated());
    }

    #[tokio::test]
    async fn ai_success_is_reported_as_ai() {
        let ai = spawn_stub(Router::new().route(
            "/chat",
            post(|| async {
                Json(serde_json::json!({
                    "choices": [{ "message": { "content": "  Hello world \n" } }]
                }))
            }),
        ))
        .await;
        let translator = Translator::new(Client::new(), UNREACHABLE.into(), None);
        let config = ai_config(format!("{}/chat", ai));
        let result = translator.resolve("你好世界", "en", "zh", Some(&config)).await;
        assert_eq!(result.text, "Hello world");
        assert_eq!(result.method, TranslationMethod::Ai);
    }

    #[tokio::test]
    async fn ai_failure_falls_back() {
        let ai = spawn_stub(Router::new().route(
            "/chat",
            post(|| async { (axum::http::StatusCode::UNAUTHORIZED, "bad key") }),
        ))
        .await;
        let google = spawn_stub(Router::new().route(
            "/single",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                assert_eq!(q["sl"], "zh-CN");
                assert_eq!(q["tl"], "ja");
                Json(serde_json::json!([[["こんにちは", q["q"].clone()]]]))
            }),
        ))
        .await;
        let translator = Translator::new(Client::new(), format!("{}/single", google), None);
        let config = ai_config(format!("{}/chat", ai));
        let result = translator.resolve("你好", "ja", "zh", Some(&config)).await;
        assert_eq!(result.text, "こんにちは");
        assert_eq!(result.method, TranslationMethod::Fallback);
    }

    #[tokio::test]
    async fn libretranslate_is_tried_last() {
        let libre = spawn_stub(Router::new().route(
            "/translate",
            post(|Json(body): Json<serde_json::Value>| async move {
                assert_eq!(body["target"], "fr");
                Json(serde_json::json!({ "translatedText": "Bonjour" }))
            }),
        ))
        .await;
        let translator = Translator::new(
            Client::new(),
            UNREACHABLE.into(),
            Some(format!("{}/translate", libre)),
        );
        let result = translator.resolve("你好", "fr", "zh", None).await;
        assert_eq!(result.text, "Bonjour");
        assert_eq!(result.method, TranslationMethod::Fallback);
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        let long = "语".repeat(60);
        let p = preview(&long);
        assert!(p.ends_with("..."));
        assert_eq!(p.chars().count(), 53);
        assert_eq!(preview("short"), "short");
    }
}
