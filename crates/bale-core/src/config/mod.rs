mod defaults;


use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::error::BaleError;
use defaults::*;

/// Environment variable that overrides `bot.token`.
pub const TOKEN_ENV: &str = "BALE_BOT_TOKEN";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bale: GeneralConfig,
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub echo: EchoConfig,
}

/// General process settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Fallback log filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// What the polling loop does when a handler fails mid-batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlerErrorPolicy {
    /// Log the failure and keep dispatching the rest of the batch.
    #[default]
    Continue,
    /// Stop the batch, report the cycle as failed and wait before polling again.
    /// Undispatched updates are redelivered by the next `getUpdates`.
    AbortBatch,
}

/// Bot API connection and polling settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Bot token. Prefer the `BALE_BOT_TOKEN` env var over writing it here.
    #[serde(default)]
    pub token: String,
    /// Endpoint prefix; the token and method name are appended to it.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Server-side long-poll wait for `getUpdates`.
    #[serde(default = "default_poll_timeout_secs")]
    pub poll_timeout_secs: u64,
    /// Fixed pause after a failed polling cycle.
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,
    /// Client-side timeout for any single HTTP request.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_on_handler_error")]
    pub on_handler_error: HandlerErrorPolicy,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            base_url: default_base_url(),
            poll_timeout_secs: default_poll_timeout_secs(),
            retry_delay_secs: default_retry_delay_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            on_handler_error: default_on_handler_error(),
        }
    }
}

// Hand-written so the token never reaches a log line through `{:?}`.
impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &crate::sanitize::mask_token(&self.token))
            .field("base_url", &self.base_url)
            .field("poll_timeout_secs", &self.poll_timeout_secs)
            .field("retry_delay_secs", &self.retry_delay_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("on_handler_error", &self.on_handler_error)
            .finish()
    }
}

impl BotConfig {
    /// Check the settings a running bot cannot do without.
    pub fn validate(&self) -> Result<(), BaleError> {
        if self.token.trim().is_empty() {
            return Err(BaleError::Config(format!(
                "bot token is empty. Set bot.token in config.toml or the {TOKEN_ENV} env var."
            )));
        }
        if self.request_timeout_secs <= self.poll_timeout_secs {
            return Err(BaleError::Config(format!(
                "request_timeout_secs ({}) must be greater than poll_timeout_secs ({})",
                self.request_timeout_secs, self.poll_timeout_secs
            )));
        }
        Ok(())
    }

    /// Replace the token with `token` when it is present and non-empty.
    pub fn apply_token_override(&mut self, token: Option<String>) {
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.token = token;
        }
    }
}

/// Settings for the built-in echo handler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EchoConfig {
    /// Label of the inline button attached to every reply.
    #[serde(default = "default_echo_button_text")]
    pub button_text: String,
    /// Link opened by that button.
    #[serde(default = "default_echo_button_url")]
    pub button_url: String,
}

impl Default for EchoConfig {
    fn default() -> Self {
        Self {
            button_text: default_echo_button_text(),
            button_url: default_echo_button_url(),
        }
    }
}

/// Parse a config from TOML text.
pub fn parse(content: &str) -> Result<Config, BaleError> {
    toml::from_str(content).map_err(|e| BaleError::Config(format!("failed to parse config: {e}")))
}

/// Load config from a TOML file, falling back to defaults if missing.
///
/// The `BALE_BOT_TOKEN` env var, when set, wins over the file.
pub fn load(path: &str) -> Result<Config, BaleError> {
    let path = Path::new(path);
    let mut config = if path.exists() {
        let content = std::fs::read_to_string(path).map_err(|e| {
            BaleError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        parse(&content)?
    } else {
        info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        Config::default()
    };

    config.bot.apply_token_override(std::env::var(TOKEN_ENV).ok());
    Ok(config)
}
