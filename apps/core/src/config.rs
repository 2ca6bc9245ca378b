//! Runtime configuration loaded from the environment.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_LLM_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Blank or missing means demo mode
    pub api_key: Option<String>,
    pub host: String,
    pub port: u16,
    pub llm_api_url: String,
    pub data_dir: PathBuf,
    /// Defaults to `<data_dir>/db/switchboard.sqlite`
    pub database_url: Option<String>,
    pub llm_timeout: Duration,
    pub fetch_timeout: Duration,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            host: "0.0.0.0".to_string(),
            port: 8000,
            llm_api_url: DEFAULT_LLM_API_URL.to_string(),
            data_dir: PathBuf::from("./data"),
            database_url: None,
            llm_timeout: Duration::from_secs(60),
            fetch_timeout: Duration::from_secs(10),
            temperature: 0.7,
            max_tokens: 4000,
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment, after loading `.env`.
    pub fn from_env() -> Result<Self, AppError> {
        dotenv::dotenv().ok();
        let defaults = Self::default();

        let config = Self {
            api_key: env::var("GROQ_API_KEY")
                .ok()
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty()),
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT", defaults.port)?,
            llm_api_url: env::var("LLM_API_URL").unwrap_or(defaults.llm_api_url),
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            llm_timeout: Duration::from_secs(parse_var("LLM_TIMEOUT_SECS", 60)?),
            fetch_timeout: Duration::from_secs(parse_var("FETCH_TIMEOUT_SECS", 10)?),
            temperature: parse_var("LLM_TEMPERATURE", defaults.temperature)?,
            max_tokens: parse_var("LLM_MAX_TOKENS", defaults.max_tokens)?,
        };

        url::Url::parse(&config.llm_api_url)?;

        Ok(config)
    }

    pub fn demo_mode(&self) -> bool {
        self.api_key.is_none()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, AppError>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid {}={}: {}", name, raw, e))),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 10] = [
        "GROQ_API_KEY",
        "HOST",
        "PORT",
        "LLM_API_URL",
        "DATA_DIR",
        "DATABASE_URL",
        "LLM_TIMEOUT_SECS",
        "FETCH_TIMEOUT_SECS",
        "LLM_TEMPERATURE",
        "LLM_MAX_TOKENS",
    ];

    /// Every known variable unset, except the given overrides.
    fn env_with(overrides: &[(&'static str, &'static str)]) -> Vec<(&'static str, Option<&'static str>)> {
        VARS.iter()
            .map(|name| {
                let value = overrides.iter().find(|(k, _)| k == name).map(|(_, v)| *v);
                (*name, value)
            })
            .collect()
    }

    #[test]
    fn test_defaults_without_env() {
        temp_env::with_vars(env_with(&[]), || {
            let config = AppConfig::from_env().unwrap();
            assert!(config.demo_mode());
            assert_eq!(config.port, 8000);
            assert_eq!(config.llm_timeout, Duration::from_secs(60));
            assert_eq!(config.fetch_timeout, Duration::from_secs(10));
            assert_eq!(config.max_tokens, 4000);
            assert_eq!(config.bind_address(), "0.0.0.0:8000");
        });
    }

    #[test]
    fn test_blank_api_key_is_demo_mode() {
        temp_env::with_vars(env_with(&[("GROQ_API_KEY", "   ")]), || {
            assert!(AppConfig::from_env().unwrap().demo_mode());
        });
    }

    #[test]
    fn test_overrides() {
        let vars = env_with(&[
            ("GROQ_API_KEY", "gsk_test"),
            ("PORT", "9001"),
            ("LLM_TIMEOUT_SECS", "5"),
        ]);
        temp_env::with_vars(vars, || {
            let config = AppConfig::from_env().unwrap();
            assert_eq!(config.api_key.as_deref(), Some("gsk_test"));
            assert_eq!(config.port, 9001);
            assert_eq!(config.llm_timeout, Duration::from_secs(5));
        });
    }

    #[test]
    fn test_invalid_number_is_config_error() {
        temp_env::with_vars(env_with(&[("PORT", "eighty")]), || {
            assert!(matches!(AppConfig::from_env(), Err(AppError::Config(_))));
        });
    }
}
