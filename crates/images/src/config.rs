//! Image service configuration from environment variables.
//!
//! - `PIXABAY_API_KEY`: API key (required for live searches)
//! - `MEMORY_MATCH_IMAGE_URL`: search endpoint (default: `https://pixabay.com/api/`)
//! - `MEMORY_MATCH_PER_PAGE`: hits requested per query (default: 20, clamped to 3..=200)
//! - `MEMORY_MATCH_TIMEOUT_MS`: request timeout (default: 10000)

use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://pixabay.com/api/";
pub const DEFAULT_PER_PAGE: u32 = 20;
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub per_page: u32,
    pub timeout: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            per_page: DEFAULT_PER_PAGE,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl SearchConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_key = lookup("PIXABAY_API_KEY")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let endpoint = lookup("MEMORY_MATCH_IMAGE_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let per_page = lookup("MEMORY_MATCH_PER_PAGE")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(3, 200);
        let timeout_ms = lookup("MEMORY_MATCH_TIMEOUT_MS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|&ms| ms > 0)
            .unwrap_or(DEFAULT_TIMEOUT_MS);

        Self {
            api_key,
            endpoint,
            per_page,
            timeout: Duration::from_millis(timeout_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::from_lookup(|_| None);
        assert_eq!(config, SearchConfig::default());
        assert_eq!(config.endpoint, "https://pixabay.com/api/");
    }

    #[test]
    fn test_overrides() {
        let config = SearchConfig::from_lookup(|name| match name {
            "PIXABAY_API_KEY" => Some(" abc ".to_string()),
            "MEMORY_MATCH_IMAGE_URL" => Some("http://127.0.0.1:9/api/".to_string()),
            "MEMORY_MATCH_PER_PAGE" => Some("500".to_string()),
            "MEMORY_MATCH_TIMEOUT_MS" => Some("250".to_string()),
            _ => None,
        });
        assert_eq!(config.api_key.as_deref(), Some("abc"));
        assert_eq!(config.endpoint, "http://127.0.0.1:9/api/");
        assert_eq!(config.per_page, 200);
        assert_eq!(config.timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_blank_key_is_missing() {
        let config = SearchConfig::from_lookup(|name| {
            (name == "PIXABAY_API_KEY").then(|| "  ".to_string())
        });
        assert_eq!(config.api_key, None);
    }
}
