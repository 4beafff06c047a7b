//! Generator configuration.
//!
//! The only external input the quiz needs is a credential for the
//! question generator. Endpoint and model have defaults and can be
//! overridden from the environment or the command line.

use std::env;

use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Environment variables checked for the API key, in order.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];
pub const BASE_URL_VAR: &str = "DEV_QUIZ_BASE_URL";
pub const MODEL_VAR: &str = "DEV_QUIZ_MODEL";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no API key found, set GEMINI_API_KEY (or API_KEY)")]
    MissingApiKey,
    #[error("base URL must start with http:// or https://, got '{0}'")]
    InvalidBaseUrl(String),
}

#[derive(Clone)]
pub struct GeneratorConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl std::fmt::Debug for GeneratorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

impl GeneratorConfig {
    /// Build the config from process environment, applying optional overrides.
    pub fn from_env(
        base_url: Option<String>,
        model: Option<String>,
    ) -> Result<Self, ConfigError> {
        Self::resolve(|name| env::var(name).ok(), base_url, model)
    }

    fn resolve(
        lookup: impl Fn(&str) -> Option<String>,
        base_url: Option<String>,
        model: Option<String>,
    ) -> Result<Self, ConfigError> {
        let non_blank = |value: String| {
            let trimmed = value.trim().to_string();
            (!trimmed.is_empty()).then_some(trimmed)
        };

        let api_key = API_KEY_VARS
            .into_iter()
            .find_map(|name| lookup(name).and_then(non_blank))
            .ok_or(ConfigError::MissingApiKey)?;

        let base_url = base_url
            .or_else(|| lookup(BASE_URL_VAR))
            .and_then(non_blank)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(base_url));
        }

        let model = model
            .or_else(|| lookup(MODEL_VAR))
            .and_then(non_blank)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Ok(Self {
            api_key,
            base_url,
            model,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::resolve(lookup(&[("GEMINI_API_KEY", "k")]), None, None).unwrap();
        assert_eq!(config.api_key, "k");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_api_key_fallback_skips_blank() {
        let env = lookup(&[("GEMINI_API_KEY", "  "), ("API_KEY", "fallback")]);
        let config = GeneratorConfig::resolve(env, None, None).unwrap();
        assert_eq!(config.api_key, "fallback");
    }

    #[test]
    fn test_missing_api_key() {
        let err = GeneratorConfig::resolve(lookup(&[]), None, None).unwrap_err();
        assert_eq!(err, ConfigError::MissingApiKey);
    }

    #[test]
    fn test_overrides_beat_environment() {
        let env = lookup(&[
            ("API_KEY", "k"),
            (MODEL_VAR, "env-model"),
            (BASE_URL_VAR, "http://env.test"),
        ]);
        let config =
            GeneratorConfig::resolve(env, Some("http://cli.test".into()), Some("cli-model".into()))
                .unwrap();
        assert_eq!(config.base_url, "http://cli.test");
        assert_eq!(config.model, "cli-model");
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let env = lookup(&[("API_KEY", "k")]);
        let err = GeneratorConfig::resolve(env, Some("ftp://nope".into()), None).unwrap_err();
        assert_eq!(err, ConfigError::InvalidBaseUrl("ftp://nope".into()));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = GeneratorConfig::resolve(lookup(&[("API_KEY", "hunter2")]), None, None).unwrap();
        assert!(!format!("{config:?}").contains("hunter2"));
    }
}
