//! Application configuration. API credentials, model and sampling parameters.
//!
//! `AppConfig` is the raw, partially-filled view read from `.env`, the environment and an
//! optional config file. `ReplyConfig` is the validated, immutable settings object handed
//! to the reply service once at startup.

use crate::domain::DomainError;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4";
pub const DEFAULT_MAX_TOKENS: u32 = 300;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TOP_P: f32 = 0.9;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Provider API key. Read from OPENAI_API_KEY or COMMENT_REPLY_API_KEY.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Chat completions endpoint. Read from OPENAI_API_URL or COMMENT_REPLY_API_URL.
    #[serde(default)]
    pub api_url: Option<String>,

    /// Model name. Defaults to "gpt-4". Read from OPENAI_MODEL or COMMENT_REPLY_MODEL.
    #[serde(default)]
    pub model: Option<String>,

    /// Max output tokens per reply. Read from MAX_TOKENS or COMMENT_REPLY_MAX_TOKENS.
    #[serde(default)]
    pub max_tokens: Option<u32>,

    /// Sampling temperature. Read from TEMPERATURE or COMMENT_REPLY_TEMPERATURE.
    #[serde(default)]
    pub temperature: Option<f32>,

    /// Nucleus sampling threshold. Read from TOP_P or COMMENT_REPLY_TOP_P.
    #[serde(default)]
    pub top_p: Option<f32>,

    /// HTTP request timeout in seconds. Read from REQUEST_TIMEOUT_SECS.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_vars(&vars)
    }

    /// Build from a snapshot of environment variables.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, config::ConfigError> {
        let mut c = config::Config::builder();
        c = c.add_source(
            config::Environment::with_prefix("COMMENT_REPLY").source(Some(vars.clone())),
        );
        if let Some(path) = vars.get("COMMENT_REPLY_CONFIG") {
            c = c.add_source(config::File::with_name(path));
        }
        let mut cfg: Self = c.build()?.try_deserialize()?;

        // Unprefixed names (OPENAI_API_KEY=..., MAX_TOKENS=...) win so an existing .env keeps working.
        if let Some(key) = vars.get("OPENAI_API_KEY") {
            cfg.api_key = Some(key.clone());
        }
        if let Some(url) = vars.get("OPENAI_API_URL") {
            cfg.api_url = Some(url.clone());
        }
        if let Some(model) = vars.get("OPENAI_MODEL") {
            cfg.model = Some(model.clone());
        }
        if let Some(n) = parse_override(vars, "MAX_TOKENS")? {
            cfg.max_tokens = Some(n);
        }
        if let Some(t) = parse_override(vars, "TEMPERATURE")? {
            cfg.temperature = Some(t);
        }
        if let Some(p) = parse_override(vars, "TOP_P")? {
            cfg.top_p = Some(p);
        }
        if let Some(secs) = parse_override(vars, "REQUEST_TIMEOUT_SECS")? {
            cfg.request_timeout_secs = Some(secs);
        }
        Ok(cfg)
    }

    /// Validate and freeze into the settings used for every reply.
    ///
    /// # Errors
    /// `DomainError::Config` when the API key is missing or any value is out of range.
    pub fn into_reply_config(self) -> Result<ReplyConfig, DomainError> {
        let api_key = self
            .api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                DomainError::Config(
                    "API key is required. Set OPENAI_API_KEY in the environment or .env file."
                        .to_string(),
                )
            })?;

        let model = non_blank(self.model).unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let api_url = non_blank(self.api_url).unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let max_tokens = self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS);
        if max_tokens == 0 {
            return Err(DomainError::Config("MAX_TOKENS must be greater than 0".into()));
        }

        let temperature = self.temperature.unwrap_or(DEFAULT_TEMPERATURE);
        if !(0.0..=2.0).contains(&temperature) {
            return Err(DomainError::Config(format!(
                "TEMPERATURE must be within 0.0..=2.0, got {temperature}"
            )));
        }

        let top_p = self.top_p.unwrap_or(DEFAULT_TOP_P);
        if !(top_p > 0.0 && top_p <= 1.0) {
            return Err(DomainError::Config(format!(
                "TOP_P must be within (0.0, 1.0], got {top_p}"
            )));
        }

        let request_timeout_secs = self
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
        if request_timeout_secs == 0 {
            return Err(DomainError::Config(
                "REQUEST_TIMEOUT_SECS must be greater than 0".into(),
            ));
        }

        Ok(ReplyConfig {
            api_key,
            api_url,
            model,
            max_tokens,
            temperature,
            top_p,
            request_timeout_secs,
        })
    }
}

/// Validated settings. Built once at startup and shared read-only.
#[derive(Clone, PartialEq)]
pub struct ReplyConfig {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub request_timeout_secs: u64,
}

impl ReplyConfig {
    /// Settings with defaults and the given key. Handy for tests and local tools.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

// Keep the key out of logs.
impl fmt::Debug for ReplyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplyConfig")
            .field("api_key", &"***")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("top_p", &self.top_p)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse an unprefixed variable. Unset is `None`; unparsable is an error.
fn parse_override<T: FromStr>(
    vars: &HashMap<String, String>,
    name: &str,
) -> Result<Option<T>, config::ConfigError> {
    match vars.get(name) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| config::ConfigError::Message(format!("{name} has invalid value {raw:?}"))),
        None => Ok(None),
    }
}
