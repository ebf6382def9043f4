use std::net::SocketAddr;

use anyhow::Context;

use crate::languages;

pub const DEFAULT_TTS_BACKEND_URL: &str = "https://tts.gbase.ai/tts";
pub const DEFAULT_TTS_REFERER: &str = "https://gbase.ai/";
pub const DEFAULT_FALLBACK_URL: &str = "https://translate.googleapis.com/translate_a/single";
pub const DEFAULT_SOURCE_LANG: &str = "zh";

/// Server settings, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub tts_backend_url: String,
    /// Sent as `Referer` to the TTS backend when set.
    pub tts_referer: Option<String>,
    pub fallback_translate_url: String,
    /// Secondary LibreTranslate-compatible endpoint, tried after the primary fallback.
    pub libretranslate_url: Option<String>,
    pub source_lang: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port: u16 = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .context("PORT must be a number")?;
        let addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .with_context(|| format!("Invalid address {}:{}", host, port))?;

        let tts_referer = match lookup("TTS_REFERER") {
            Some(v) if v.is_empty() => None,
            Some(v) => Some(v),
            None => Some(DEFAULT_TTS_REFERER.to_string()),
        };

        Ok(Self {
            addr,
            tts_backend_url: lookup("TTS_BACKEND_URL")
                .unwrap_or_else(|| DEFAULT_TTS_BACKEND_URL.to_string()),
            tts_referer,
            fallback_translate_url: lookup("TRANSLATE_FALLBACK_URL")
                .unwrap_or_else(|| DEFAULT_FALLBACK_URL.to_string()),
            libretranslate_url: lookup("LIBRETRANSLATE_URL").filter(|v| !v.is_empty()),
            source_lang: languages::normalize_code(
                &lookup("SOURCE_LANG").unwrap_or_else(|| DEFAULT_SOURCE_LANG.to_string()),
            ),
        })
    }
}
