//! Runtime configuration loaded from `.env` and the process environment.

use std::env;
use thiserror::Error;

pub const API_KEY_VAR: &str = "AI_GATEWAY_API_KEY";

pub const DEFAULT_GATEWAY_URL: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";
pub const DEFAULT_LOG_LEVEL: &str = "performance_predictor=info,actix_web=info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub gateway_url: String,
    /// Optional at startup. Requests fail individually when it is absent.
    pub api_key: Option<String>,
    pub model: String,
    pub log_level: String,
    pub log_file: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port = match env::var("PORT") {
            Ok(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value,
            })?,
            Err(_) => 8080,
        };

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port,
            gateway_url: env::var("AI_GATEWAY_URL").unwrap_or_else(|_| DEFAULT_GATEWAY_URL.into()),
            api_key: env::var(API_KEY_VAR).ok().filter(|key| !key.is_empty()),
            model: env::var("AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.into()),
            log_file: env::var("LOG_FILE").ok().filter(|file| !file.is_empty()),
        })
    }
}
