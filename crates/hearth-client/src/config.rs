//! Client configuration loaded from environment variables.
//!
//! Every setting has a default so a client can be built with zero
//! configuration against a local development server.

use std::fmt;

use hearth_shared::constants::{
    DEFAULT_API_URL, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_BACKOFF_MS, DEFAULT_TIMEOUT_SECS,
};
use hearth_shared::DecodeOptions;
use thiserror::Error;

/// Client configuration.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the API server, without the `/api/v1` prefix.
    /// Env: `HEARTH_API_URL`
    /// Default: `http://localhost:8000`
    pub api_url: String,

    /// Bearer token attached to every request.
    /// Env: `HEARTH_API_TOKEN`
    /// Default: none (anonymous).
    pub api_token: Option<String>,

    /// Per-request timeout in seconds.
    /// Env: `HEARTH_TIMEOUT_SECS`
    /// Default: `30`
    pub timeout_secs: u64,

    /// Retries for reads that failed with a timeout or connection error.
    /// Env: `HEARTH_MAX_RETRIES`
    /// Default: `2`
    pub max_retries: u32,

    /// Base back-off between retries, multiplied by the attempt number.
    pub retry_backoff_ms: u64,

    /// Fail on unknown response fields instead of logging them.
    /// Env: `HEARTH_STRICT_DECODING` (true/false)
    /// Default: `false`
    pub strict_decoding: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff_ms: DEFAULT_RETRY_BACKOFF_MS,
            strict_decoding: false,
        }
    }
}

// The token never reaches logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_url", &self.api_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_ms", &self.retry_backoff_ms)
            .field("strict_decoding", &self.strict_decoding)
            .finish()
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup("HEARTH_API_URL") {
            if url.starts_with("http://") || url.starts_with("https://") {
                config.api_url = url.trim_end_matches('/').to_string();
            } else {
                tracing::warn!(value = %url, "Invalid HEARTH_API_URL, using default");
            }
        }

        if let Some(token) = lookup("HEARTH_API_TOKEN") {
            if !token.is_empty() {
                config.api_token = Some(token);
            }
        }

        if let Some(val) = lookup("HEARTH_TIMEOUT_SECS") {
            match val.parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout_secs = secs,
                _ => tracing::warn!(value = %val, "Invalid HEARTH_TIMEOUT_SECS, using default"),
            }
        }

        if let Some(val) = lookup("HEARTH_MAX_RETRIES") {
            match val.parse::<u32>() {
                Ok(n) => config.max_retries = n,
                Err(_) => tracing::warn!(value = %val, "Invalid HEARTH_MAX_RETRIES, using default"),
            }
        }

        if let Some(val) = lookup("HEARTH_STRICT_DECODING") {
            match val.to_ascii_lowercase().as_str() {
                "true" | "1" => config.strict_decoding = true,
                "false" | "0" => config.strict_decoding = false,
                _ => tracing::warn!(value = %val, "Invalid HEARTH_STRICT_DECODING, using default"),
            }
        }

        config
    }

    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            strict: self.strict_decoding,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API token contains characters not allowed in a header")]
    InvalidToken,

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url, "http://localhost:8000");
        assert_eq!(config.timeout_secs, 30);
        assert!(!config.decode_options().strict);
    }

    #[test]
    fn test_env_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("HEARTH_API_URL", "https://api.example.com/"),
            ("HEARTH_API_TOKEN", "secret"),
            ("HEARTH_MAX_RETRIES", "0"),
            ("HEARTH_STRICT_DECODING", "true"),
        ]));
        assert_eq!(config.api_url, "https://api.example.com");
        assert_eq!(config.api_token.as_deref(), Some("secret"));
        assert_eq!(config.max_retries, 0);
        assert!(config.decode_options().strict);
        assert!(!format!("{config:?}").contains("secret"));
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("HEARTH_API_URL", "ftp://nope"),
            ("HEARTH_TIMEOUT_SECS", "soon"),
            ("HEARTH_STRICT_DECODING", "strictly"),
        ]));
        assert_eq!(config.api_url, "http://localhost:8000");
        assert_eq!(config.timeout_secs, 30);
        assert!(!config.strict_decoding);
    }

    #[test]
    fn test_strict_decoding_flag_values() {
        let strict = |val: &str| {
            ClientConfig::from_lookup(lookup(&[("HEARTH_STRICT_DECODING", val)])).strict_decoding
        };
        assert!(strict("TRUE"));
        assert!(strict("1"));
        assert!(!strict("false"));
        assert!(!strict("0"));
        assert!(!strict("on"));
    }
}
