use reqwest::{header, Client};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::AppError;
use crate::translate::preview;

/// Payloads below this are error bodies dressed up as audio, not speech.
pub const MIN_AUDIO_BYTES: usize = 100;

pub const DEFAULT_CONTENT_TYPE: &str = "audio/wav";

#[derive(Debug)]
pub struct SynthesizedAudio {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

#[derive(Debug, Serialize)]
struct BackendRequest<'a> {
    text: &'a str,
    lang: &'a str,
}

/// Forwards text to the remote synthesis backend.
pub struct TtsForwarder {
    client: Client,
    endpoint: String,
    referer: Option<String>,
}

impl TtsForwarder {
    pub fn new(client: Client, endpoint: String, referer: Option<String>) -> Self {
        Self {
            client,
            endpoint,
            referer,
        }
    }

    pub async fn synthesize(&self, text: &str, lang: &str) -> Result<SynthesizedAudio, AppError> {
        debug!("TTS request: lang={}, text=\"{}\"", lang, preview(text));

        let mut request = self
            .client
            .post(&self.endpoint)
            .header(header::ACCEPT, "audio/wav, audio/*")
            .json(&BackendRequest { text, lang });
        if let Some(referer) = &self.referer {
            request = request.header(header::REFERER, referer);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        let bytes = response.bytes().await?.to_vec();
        info!("Audio received: {} bytes ({})", bytes.len(), content_type);

        if bytes.len() < MIN_AUDIO_BYTES {
            return Err(AppError::InvalidAudio {
                size: bytes.len(),
                lang: lang.to_string(),
            });
        }

        Ok(SynthesizedAudio {
            bytes,
            content_type,
        })
    }
}
