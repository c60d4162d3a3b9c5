//! Client configuration baked in at build time.
//!
//! A WASM bundle has no process environment at runtime, so values come from
//! `option_env!` when the crate is compiled.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u32 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every gateway path is appended to, without a trailing `/`.
    pub api_base_url: String,
    /// Abort outstanding requests after this many milliseconds.
    pub request_timeout_ms: u32,
}

impl ClientConfig {
    pub fn new(api_base_url: &str) -> Self {
        Self {
            api_base_url: normalize_base_url(api_base_url),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }

    /// Build config from compile-time environment variables.
    ///
    /// Optional:
    /// - `FLASHCARDS_API_URL`: default `http://localhost:8080/api`
    /// - `FLASHCARDS_REQUEST_TIMEOUT_MS`: default 10000
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("FLASHCARDS_API_URL"),
            option_env!("FLASHCARDS_REQUEST_TIMEOUT_MS"),
        )
    }

    fn from_values(base_url: Option<&str>, timeout_ms: Option<&str>) -> Self {
        let api_base_url = base_url
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL);
        let request_timeout_ms = timeout_ms
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS);
        Self { api_base_url: normalize_base_url(api_base_url), request_timeout_ms }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim_end_matches('/').to_owned()
}
