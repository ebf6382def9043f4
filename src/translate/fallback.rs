//! Public translation endpoints used when no AI provider is configured or it fails.

use reqwest::{header, Client};
use serde::Serialize;
use serde_json::Value;

use super::TranslationError;
use crate::languages;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Google's `translate_a/single` endpoint (`client=gtx`).
pub async fn google(
    client: &Client,
    url: &str,
    text: &str,
    target: &str,
    source: &str,
) -> Result<String, TranslationError> {
    let response = client
        .get(url)
        .query(&[
            ("client", "gtx"),
            ("sl", languages::provider_code(source)),
            ("tl", languages::provider_code(target)),
            ("dt", "t"),
            ("q", text),
        ])
        .header(header::USER_AGENT, USER_AGENT)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(TranslationError::Status(response.status().as_u16()));
    }

    let body: Value = response.json().await?;
    join_segments(&body).ok_or(TranslationError::EmptyResult)
}

/// Google splits longer input into sentences at `[0][*][0]`; join them back.
pub fn join_segments(body: &Value) -> Option<String> {
    let translation: String = body
        .get(0)?
        .as_array()?
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translation.trim().is_empty() {
        None
    } else {
        Some(translation)
    }
}

#[derive(Debug, Serialize)]
struct LibreRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
}

/// LibreTranslate-compatible `POST /translate`.
pub async fn libretranslate(
    client: &Client,
    url: &str,
    text: &str,
    target: &str,
    source: &str,
) -> Result<String, TranslationError> {
    // LibreTranslate only knows base codes
    let target_code = languages::provider_code(target);
    let target_code = target_code.split('-').next().unwrap_or(target_code);

    let response = client
        .post(url)
        .json(&LibreRequest {
            q: text,
            source,
            target: target_code,
            format: "text",
        })
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(TranslationError::Status(response.status().as_u16()));
    }

    let body: Value = response.json().await?;
    body.get("translatedText")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or(TranslationError::EmptyResult)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn joins_multi_sentence_segments() {
        let body = json!([
            [["Hello. ", "你好。", null, null, 1], ["How are you?", "你好吗？", null, null, 1]],
            null,
            "zh-CN"
        ]);
        assert_eq!(join_segments(&body).as_deref(), Some("Hello. How are you?"));
    }

    #[test]
    fn rejects_unexpected_shapes() {
        assert!(join_segments(&json!({ "text": "hi" })).is_none());
        assert!(join_segments(&json!([null])).is_none());
        assert!(join_segments(&json!([[[""]]])).is_none());
    }
}
