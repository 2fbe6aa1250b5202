use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub openai_api_key: String,
    pub gpt: GptConfig,
    /// Directory holding one sprite per tile, named by `Tile::sprite_key`.
    pub sprite_dir: PathBuf,
    /// When set, logs are also written to a daily-rolling file in this directory.
    pub log_dir: Option<PathBuf>,
    pub port: u16,
    pub rust_log: String,
}

/// Sampling settings handed to the chat-completion oracle.
#[derive(Debug, Clone, PartialEq)]
pub struct GptConfig {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub n: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            openai_api_key: require_env("OPENAI_API_KEY")?,
            gpt: GptConfig {
                model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".to_string()),
                temperature: env_or("OPENAI_TEMPERATURE", 0.7)?,
                max_tokens: env_or("OPENAI_MAX_TOKENS", 1024)?,
                n: env_or("OPENAI_N", 1)?,
            },
            sprite_dir: std::env::var("SPRITE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("img")),
            log_dir: std::env::var("LOG_DIR").ok().map(PathBuf::from),
            port: env_or("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    parse_or(key, std::env::var(key).ok().as_deref(), default)
}

/// Parses `raw` when present; an unparseable value is an error, not a silent default.
fn parse_or<T>(key: &str, raw: Option<&str>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => value
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has invalid value '{value}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_uses_default_when_absent() {
        assert_eq!(parse_or::<u16>("PORT", None, 8080).unwrap(), 8080);
    }

    #[test]
    fn test_parse_or_parses_present_value() {
        assert_eq!(parse_or::<u32>("OPENAI_N", Some(" 3 "), 1).unwrap(), 3);
        let t = parse_or::<f32>("OPENAI_TEMPERATURE", Some("0.2"), 0.7).unwrap();
        assert!((t - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn test_parse_or_rejects_malformed_value() {
        let err = parse_or::<u16>("PORT", Some("eighty"), 8080).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
