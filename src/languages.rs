//! Supported languages and code normalization.

use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct LanguageEntry {
    #[serde(skip)]
    pub code: &'static str,
    #[serde(rename = "name")]
    pub english_name: &'static str,
    #[serde(rename = "displayName")]
    pub native_name: &'static str,
    /// Name of the language written in the source language (Chinese).
    #[serde(rename = "chineseName")]
    pub source_display_name: &'static str,
    /// Code understood by the fallback translation endpoint.
    #[serde(rename = "googleCode")]
    pub provider_code: &'static str,
}

const fn entry(
    code: &'static str,
    english_name: &'static str,
    native_name: &'static str,
    source_display_name: &'static str,
    provider_code: &'static str,
) -> LanguageEntry {
    LanguageEntry {
        code,
        english_name,
        native_name,
        source_display_name,
        provider_code,
    }
}

pub const LANGUAGES: &[LanguageEntry] = &[
    entry("zh", "Chinese", "中文", "中文", "zh-CN"),
    entry("en", "English", "English", "英语", "en"),
    entry("ja", "Japanese", "日本語", "日语", "ja"),
    entry("ko", "Korean", "한국어", "韩语", "ko"),
    entry("fr", "French", "Français", "法语", "fr"),
    entry("de", "German", "Deutsch", "德语", "de"),
    entry("it", "Italian", "Italiano", "意大利语", "it"),
    entry("vi", "Vietnamese", "Tiếng Việt", "越南语", "vi"),
    entry("es", "Spanish", "Español", "西班牙语", "es"),
    entry("id", "Indonesian", "Bahasa Indonesia", "印尼语", "id"),
    entry("tr", "Turkish", "Türkçe", "土耳其语", "tr"),
    entry("pl", "Polish", "Polski", "波兰语", "pl"),
    entry("pt", "Portuguese", "Português", "葡萄牙语", "pt"),
    entry("nl", "Dutch", "Nederlands", "荷兰语", "nl"),
    entry("sv", "Swedish", "Svenska", "瑞典语", "sv"),
    entry("cs", "Czech", "Čeština", "捷克语", "cs"),
];

lazy_static! {
    static ref BY_CODE: HashMap<&'static str, &'static LanguageEntry> =
        LANGUAGES.iter().map(|l| (l.code, l)).collect();
}

pub fn lookup(code: &str) -> Option<&'static LanguageEntry> {
    BY_CODE.get(code).copied()
}

/// Lowercase and drop any region suffix: `zh-CN` -> `zh`.
pub fn normalize_code(code: &str) -> String {
    let lower = code.trim().to_lowercase();
    match lower.split_once('-') {
        Some((base, _)) => base.to_string(),
        None => lower,
    }
}

/// Code to send to the fallback translation endpoint, passing unknown codes through.
pub fn provider_code(code: &str) -> &str {
    lookup(code).map(|l| l.provider_code).unwrap_or(code)
}

pub fn english_name(code: &str) -> &str {
    lookup(code).map(|l| l.english_name).unwrap_or(code)
}

pub fn native_name(code: &str) -> &str {
    lookup(code).map(|l| l.native_name).unwrap_or(code)
}

pub fn supported_codes() -> Vec<&'static str> {
    LANGUAGES.iter().map(|l| l.code).collect()
}
