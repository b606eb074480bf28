//! Process configuration for the two upstream services.
//!
//! Values come from environment variables (a `.env` file is loaded first if present).
//! Only the two API keys are required; everything else has a default.

use std::time::Duration;

use ai_client::AiConfig;
use catalog::CatalogConfig;
use thiserror::Error;

pub const TMDB_API_KEY: &str = "TMDB_API_KEY";
pub const TMDB_BASE_URL: &str = "TMDB_BASE_URL";
pub const TMDB_LANGUAGE: &str = "TMDB_LANGUAGE";
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const OPENAI_URL: &str = "OPENAI_URL";
pub const OPENAI_MODEL: &str = "OPENAI_MODEL";
pub const OPENAI_TEMPERATURE: &str = "OPENAI_TEMPERATURE";
pub const OPENAI_MAX_TOKENS: &str = "OPENAI_MAX_TOKENS";
pub const HTTP_TIMEOUT_SECS: &str = "HTTP_TIMEOUT_SECS";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required setting {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Settings for both upstream clients
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    pub ai: AiConfig,
}

impl AppConfig {
    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup (environment, map, ...)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &'static str| lookup(key).filter(|value| !value.trim().is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let timeout = Duration::from_secs(parse_or(get(HTTP_TIMEOUT_SECS), HTTP_TIMEOUT_SECS, 30)?);

        let mut catalog = CatalogConfig::new(require(TMDB_API_KEY)?).with_timeout(timeout);
        if let Some(base_url) = get(TMDB_BASE_URL) {
            catalog = catalog.with_base_url(base_url);
        }
        if let Some(language) = get(TMDB_LANGUAGE) {
            catalog = catalog.with_language(language);
        }

        let temperature = parse_or(
            get(OPENAI_TEMPERATURE),
            OPENAI_TEMPERATURE,
            ai_client::DEFAULT_TEMPERATURE,
        )?;
        let max_tokens = parse_or(
            get(OPENAI_MAX_TOKENS),
            OPENAI_MAX_TOKENS,
            ai_client::DEFAULT_MAX_TOKENS,
        )?;

        // Summaries follow the catalog locale
        let mut ai = AiConfig::new(require(OPENAI_API_KEY)?)
            .with_sampling(temperature, max_tokens)
            .with_language(catalog.language.clone())
            .with_timeout(timeout);
        if let Some(url) = get(OPENAI_URL) {
            ai = ai.with_url(url);
        }
        if let Some(model) = get(OPENAI_MODEL) {
            ai = ai.with_model(model);
        }

        Ok(Self { catalog, ai })
    }
}

fn parse_or<T: std::str::FromStr>(
    value: Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_with_only_keys() {
        let config =
            AppConfig::from_lookup(lookup_from(&[(TMDB_API_KEY, "tmdb"), (OPENAI_API_KEY, "oa")]))
                .unwrap();

        assert_eq!(config.catalog.api_key, "tmdb");
        assert_eq!(config.catalog.base_url, catalog::client::DEFAULT_BASE_URL);
        assert_eq!(config.catalog.language, "da-DK");
        assert_eq!(config.ai.model, ai_client::DEFAULT_MODEL);
        assert_eq!(config.ai.temperature, 0.7);
        assert_eq!(config.ai.max_tokens, 150);
        assert_eq!(config.ai.language, "da-DK");
        assert_eq!(config.catalog.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (TMDB_API_KEY, "tmdb"),
            (TMDB_LANGUAGE, "en-US"),
            (TMDB_BASE_URL, "http://localhost:9000"),
            (OPENAI_API_KEY, "oa"),
            (OPENAI_MODEL, "gpt-4o-mini"),
            (OPENAI_TEMPERATURE, "0.9"),
            (OPENAI_MAX_TOKENS, "200"),
            (HTTP_TIMEOUT_SECS, "5"),
        ]))
        .unwrap();

        assert_eq!(config.catalog.base_url, "http://localhost:9000");
        assert_eq!(config.ai.language, "en-US");
        assert_eq!(config.ai.model, "gpt-4o-mini");
        assert_eq!(config.ai.temperature, 0.9);
        assert_eq!(config.ai.max_tokens, 200);
        assert_eq!(config.ai.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_missing_key_is_reported() {
        let err = AppConfig::from_lookup(lookup_from(&[(TMDB_API_KEY, "tmdb")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(OPENAI_API_KEY)));

        let err = AppConfig::from_lookup(lookup_from(&[(OPENAI_API_KEY, "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(TMDB_API_KEY)));
    }

    #[test]
    fn test_unparsable_number_is_reported() {
        let err = AppConfig::from_lookup(lookup_from(&[
            (TMDB_API_KEY, "tmdb"),
            (OPENAI_API_KEY, "oa"),
            (OPENAI_MAX_TOKENS, "lots"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: OPENAI_MAX_TOKENS, .. }));
    }
}
