//! Custom AI translation through an OpenAI-style chat completion endpoint.

use reqwest::{header, Client};
use serde::Serialize;
use serde_json::Value;

use super::TranslationError;
use crate::languages;

const SYSTEM_PROMPT: &str = "You are a professional translation assistant fluent in many languages. \
Reply with the translation only, without any explanation or extra content.";

#[derive(Debug, Clone, PartialEq)]
pub struct AiProviderConfig {
    pub endpoint_url: String,
    pub api_key: String,
    pub model_name: String,
}

impl AiProviderConfig {
    /// All three parts must be present and non-empty; anything less counts as no config.
    pub fn from_parts(
        endpoint_url: Option<String>,
        api_key: Option<String>,
        model_name: Option<String>,
    ) -> Option<Self> {
        let present = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        Some(Self {
            endpoint_url: present(endpoint_url)?,
            api_key: present(api_key)?,
            model_name: present(model_name)?,
        })
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

fn user_prompt(text: &str, target: &str, source: &str) -> String {
    let source_name = languages::english_name(source);
    format!(
        "Translate the following {source_name} text into {target_name}. \
Return only the translated text, without any explanation or other content.\n\n\
{source_name} text: {text}",
        source_name = source_name,
        target_name = languages::native_name(target),
        text = text,
    )
}

pub async fn translate(
    client: &Client,
    config: &AiProviderConfig,
    text: &str,
    target: &str,
    source: &str,
) -> Result<String, TranslationError> {
    let request = ChatRequest {
        model: &config.model_name,
        messages: vec![
            ChatMessage {
                role: "system",
                content: SYSTEM_PROMPT.to_string(),
            },
            ChatMessage {
                role: "user",
                content: user_prompt(text, target, source),
            },
        ],
        temperature: 0.3,
        max_tokens: 2000,
    };

    let response = client
        .post(&config.endpoint_url)
        .header(header::AUTHORIZATION, format!("Bearer {}", config.api_key))
        .json(&request)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(TranslationError::Status(response.status().as_u16()));
    }

    let body: Value = response.json().await?;
    extract_completion(&body).ok_or(TranslationError::EmptyResult)
}

type Extractor = fn(&Value) -> Option<&str>;

// Providers disagree on where the completion lives; tried in order.
const EXTRACTORS: &[Extractor] = &[chat_choices, output_text, plain_result];

fn chat_choices(body: &Value) -> Option<&str> {
    body.pointer("/choices/0/message/content")?.as_str()
}

fn output_text(body: &Value) -> Option<&str> {
    body.pointer("/output/text")?.as_str()
}

fn plain_result(body: &Value) -> Option<&str> {
    body.get("result")?.as_str()
}

/// Pull the translated text out of a provider response, first non-empty match wins.
pub fn extract_completion(body: &Value) -> Option<String> {
    EXTRACTORS
        .iter()
        .filter_map(|extract| extract(body))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}
