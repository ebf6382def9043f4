pub mod handlers;
pub mod routes;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::languages;
use crate::translate::{AiProviderConfig, TranslationMethod};

/// `aiConfig` as sent by clients; only used if every part is filled in.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiConfigBody {
    #[serde(default, alias = "endpointUrl")]
    pub api_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default, alias = "modelName")]
    pub model: Option<String>,
}

impl AiConfigBody {
    fn into_config(self) -> Option<AiProviderConfig> {
        AiProviderConfig::from_parts(self.api_url, self.api_key, self.model)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakBody {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub translate: Option<bool>,
    #[serde(default)]
    pub source_lang: Option<String>,
    #[serde(default)]
    pub ai_config: Option<AiConfigBody>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateBody {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub source_lang: Option<String>,
    #[serde(default)]
    pub ai_config: Option<AiConfigBody>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranslationRequest {
    pub text: String,
    pub target: String,
    pub source: String,
    pub ai_config: Option<AiProviderConfig>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    pub text: String,
    pub target: String,
    pub translate: bool,
    pub source: String,
    pub ai_config: Option<AiProviderConfig>,
}

fn required_text(text: Option<String>) -> Result<String, AppError> {
    text.filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing required parameter: text".into()))
}

/// `/translate` without `lang` translates into English.
pub const DEFAULT_TRANSLATE_TARGET: &str = "en";

fn code_or(code: Option<String>, default: &str) -> String {
    languages::normalize_code(code.as_deref().unwrap_or(default))
}

impl TranslateBody {
    pub fn validate(self, default_source: &str) -> Result<TranslationRequest, AppError> {
        let text = required_text(self.text)?;
        let source = code_or(self.source_lang, default_source);
        Ok(TranslationRequest {
            text,
            target: code_or(self.lang, DEFAULT_TRANSLATE_TARGET),
            source,
            ai_config: self.ai_config.and_then(AiConfigBody::into_config),
        })
    }
}

impl SpeakBody {
    pub fn validate(self, default_source: &str) -> Result<SynthesisRequest, AppError> {
        let text = required_text(self.text)?;
        let source = code_or(self.source_lang, default_source);
        Ok(SynthesisRequest {
            text,
            target: code_or(self.lang, &source),
            translate: self.translate.unwrap_or(false),
            source,
            ai_config: self.ai_config.and_then(AiConfigBody::into_config),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResponse {
    pub original_text: String,
    pub translated_text: String,
    pub target_lang: String,
    pub method: TranslationMethod,
}

#[derive(Debug, Serialize)]
pub struct EndpointsInfo {
    pub tts: &'static str,
    pub translate: &'static str,
    pub languages: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub service: &'static str,
    pub version: &'static str,
    pub languages: usize,
    pub features: Vec<&'static str>,
    pub endpoints: EndpointsInfo,
    pub supported_languages: Vec<&'static str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn speak(json: serde_json::Value) -> Result<SynthesisRequest, AppError> {
        serde_json::from_value::<SpeakBody>(json).unwrap().validate("zh")
    }

    #[test]
    fn missing_or_empty_text_is_rejected() {
        assert!(matches!(speak(serde_json::json!({})), Err(AppError::BadRequest(_))));
        assert!(matches!(
            speak(serde_json::json!({ "text": "" })),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn defaults_fill_in() {
        let request = speak(serde_json::json!({ "text": "你好" })).unwrap();
        assert_eq!(request.target, "zh");
        assert_eq!(request.source, "zh");
        assert!(!request.translate);
        assert!(request.ai_config.is_none());
    }

    #[test]
    fn codes_are_normalized() {
        let request = speak(serde_json::json!({
            "text": "hi",
            "lang": "PT-BR",
            "sourceLang": "zh-Hans"
        }))
        .unwrap();
        assert_eq!(request.target, "pt");
        assert_eq!(request.source, "zh");
    }

    #[test]
    fn ai_config_accepts_both_field_spellings() {
        let request = speak(serde_json::json!({
            "text": "hi",
            "aiConfig": { "endpointUrl": "http://ai", "apiKey": "k", "modelName": "m" }
        }))
        .unwrap();
        let config = request.ai_config.unwrap();
        assert_eq!(config.endpoint_url, "http://ai");
        assert_eq!(config.model_name, "m");

        let partial = speak(serde_json::json!({
            "text": "hi",
            "aiConfig": { "apiUrl": "http://ai", "apiKey": "k" }
        }))
        .unwrap();
        assert!(partial.ai_config.is_none());
    }

    #[test]
    fn translate_body_defaults_target_to_english() {
        let request = serde_json::from_value::<TranslateBody>(serde_json::json!({ "text": "你好" }))
            .unwrap()
            .validate("zh")
            .unwrap();
        assert_eq!(request.target, "en");
        assert_eq!(request.source, "zh");
    }

    #[test]
    fn speak_body_without_lang_stays_in_source() {
        let request = speak(serde_json::json!({ "text": "你好", "translate": true })).unwrap();
        assert_eq!(request.target, "zh");
    }
}
