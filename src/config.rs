//! Service configuration loaded from the environment
//!
//! `OPENAI_API_KEY` is required; everything else has a default.

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

use crate::llm::openai::{DEFAULT_MODEL, OPENAI_CHAT_COMPLETIONS_URL};
use crate::validation::ValidationConfig;

pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_API_URL: &str = "OPENAI_API_URL";
pub const ENV_MODEL: &str = "OPENAI_MODEL";
pub const ENV_TIMEOUT_SECS: &str = "TRIPVALIDATOR_TIMEOUT_SECS";
pub const ENV_BIND: &str = "TRIPVALIDATOR_BIND";

const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_BIND: &str = "127.0.0.1:3030";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{name} has an invalid value `{value}`: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    pub request_timeout: Duration,
    pub bind_addr: SocketAddr,
}

// Hand-written so the API key never reaches the logs
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("request_timeout", &self.request_timeout)
            .field("bind_addr", &self.bind_addr)
            .finish()
    }
}

impl AppConfig {
    /// Read configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let api_key = read(ENV_API_KEY).ok_or(ConfigError::Missing(ENV_API_KEY))?;
        let api_url = read(ENV_API_URL).unwrap_or_else(|| OPENAI_CHAT_COMPLETIONS_URL.to_string());
        reqwest::Url::parse(&api_url).map_err(|e| ConfigError::Invalid {
            name: ENV_API_URL,
            value: api_url.clone(),
            reason: e.to_string(),
        })?;
        let model = read(ENV_MODEL).unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let timeout_secs = match read(ENV_TIMEOUT_SECS) {
            Some(value) => match value.trim().parse::<u64>().ok() {
                Some(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: ENV_TIMEOUT_SECS,
                        value,
                        reason: "expected a positive number of seconds".to_string(),
                    })
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        let bind = read(ENV_BIND).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr = bind.trim().parse().map_err(|e: std::net::AddrParseError| {
            ConfigError::Invalid {
                name: ENV_BIND,
                value: bind.clone(),
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            api_key,
            api_url,
            model,
            request_timeout: Duration::from_secs(timeout_secs),
            bind_addr,
        })
    }

    pub fn validation_config(&self) -> ValidationConfig {
        ValidationConfig {
            request_timeout: self.request_timeout,
            ..ValidationConfig::default()
        }
    }
}
