//! Configuration for the uplifter service

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Main service configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Text extraction configuration
    pub extraction: ExtractionConfig,
    /// Remote analysis service configuration
    pub llm: LlmConfig,
    /// Heuristic analyzer configuration
    pub analyzer: AnalyzerConfig,
}

impl AppConfig {
    /// Load defaults, then apply overrides from the environment (and `.env`)
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Some(host) = env_string("UPLIFTER_HOST") {
            config.server.host = host;
        }
        if let Some(port) = env_parse("UPLIFTER_PORT")? {
            config.server.port = port;
        }
        if let Some(limit) = env_parse("UPLIFTER_MAX_UPLOAD_BYTES")? {
            config.server.max_upload_size = limit;
        }
        if let Some(max_chars) = env_parse("UPLIFTER_MAX_CHARS")? {
            config.extraction.max_chars = max_chars;
        }
        if let Some(binary) = env_string("TESSERACT_BIN") {
            config.extraction.ocr.binary = PathBuf::from(binary);
        }
        if let Some(language) = env_string("TESSERACT_LANG") {
            config.extraction.ocr.language = language;
        }
        if let Some(api_key) = env_string("ANTHROPIC_API_KEY") {
            config.llm.api_key = Some(api_key);
        }
        if let Some(base_url) = env_string("ANTHROPIC_BASE_URL") {
            config.llm.base_url = base_url;
        }
        if let Some(model) = env_string("ANTHROPIC_MODEL") {
            config.llm.model = model;
        }
        if let Some(max_tokens) = env_parse("ANTHROPIC_MAX_TOKENS")? {
            config.llm.max_tokens = max_tokens;
        }

        Ok(config)
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env_string(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| Error::Config(format!("{} has invalid value '{}': {}", key, raw, e))),
        None => Ok(None),
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
    /// Maximum upload size in bytes (default: 50MB)
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            enable_cors: true,
            max_upload_size: 50 * 1024 * 1024, // 50MB
        }
    }
}

/// Text extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Hard cap on normalized text length, in characters
    pub max_chars: usize,
    /// OCR engine configuration
    #[serde(default)]
    pub ocr: OcrConfig,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_chars: 15_000,
            ocr: OcrConfig::default(),
        }
    }
}

/// Tesseract OCR configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrConfig {
    /// Path or name of the tesseract binary
    pub binary: PathBuf,
    /// Recognition language
    pub language: String,
    /// Per-image timeout in seconds
    pub timeout_secs: u64,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("tesseract"),
            language: "eng".to_string(),
            timeout_secs: 120,
        }
    }
}

/// Remote analysis service (Anthropic Messages API) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API base URL
    pub base_url: String,
    /// API key; the remote service is disabled when unset
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// API version header value
    pub api_version: String,
    /// Model name
    pub model: String,
    /// Maximum tokens in the generated report
    pub max_tokens: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.anthropic.com".to_string(),
            api_key: None,
            api_version: "2023-06-01".to_string(),
            model: "claude-sonnet-4-20250514".to_string(),
            max_tokens: 1000,
            timeout_secs: 60,
        }
    }
}

impl LlmConfig {
    /// Whether a remote provider can be built from this configuration
    pub fn is_enabled(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

/// Heuristic analyzer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Number of key terms listed in the report
    pub key_term_limit: usize,
    /// Words ignored when ranking key terms
    pub stop_words: Vec<String>,
    /// Reading speed used for the reading-time estimate
    pub words_per_minute: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            key_term_limit: 8,
            stop_words: DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
            words_per_minute: 200,
        }
    }
}

/// Common English function words
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do",
    "does", "did", "will", "would", "should", "could", "may", "might", "must", "can", "this",
    "that", "these", "those", "it", "its", "as",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.extraction.max_chars, 15_000);
        assert_eq!(config.analyzer.key_term_limit, 8);
        assert_eq!(config.analyzer.words_per_minute, 200);
        assert_eq!(config.llm.max_tokens, 1000);
        assert!(!config.llm.is_enabled());
        assert!(config.analyzer.stop_words.iter().any(|w| w == "these"));
    }

    #[test]
    fn test_llm_enabled_requires_non_blank_key() {
        let mut llm = LlmConfig::default();
        llm.api_key = Some("   ".to_string());
        assert!(!llm.is_enabled());
        llm.api_key = Some("sk-test".to_string());
        assert!(llm.is_enabled());
    }

    #[test]
    fn test_api_key_not_serialized() {
        let mut config = AppConfig::default();
        config.llm.api_key = Some("secret".to_string());
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
    }
}
