//! Configuration loading: optional TOML file, then environment overrides.
//!
//! Environment variables win over the file. Empty values count as unset, so
//! `FORM_RELAY_TELEGRAM_BOT_TOKEN=` disables notifications even when the file
//! configures a token.

use std::path::Path;

use anyhow::{Context, Result};
use relay::{BotToken, ChatId, RelayConfig, WebhookUrl, DEFAULT_TELEGRAM_API_BASE};
use serde::Deserialize;
use tracing::warn;

/// Overrides `webhook_url`.
pub const ENV_WEBHOOK_URL: &str = "FORM_RELAY_WEBHOOK_URL";
/// Overrides `telegram.bot_token`.
pub const ENV_BOT_TOKEN: &str = "FORM_RELAY_TELEGRAM_BOT_TOKEN";
/// Overrides `telegram.chat_id`.
pub const ENV_CHAT_ID: &str = "FORM_RELAY_TELEGRAM_CHAT_ID";
/// Overrides `telegram.api_base`.
pub const ENV_API_BASE: &str = "FORM_RELAY_TELEGRAM_API_BASE";

/// On-disk configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Webhook server submission endpoint.
    #[serde(default)]
    pub webhook_url: Option<String>,
    /// `[telegram]` table.
    #[serde(default)]
    pub telegram: TelegramSection,
}

/// The `[telegram]` table of the configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramSection {
    /// Bot token for status notifications.
    #[serde(default)]
    pub bot_token: Option<String>,
    /// Chat that receives status notifications.
    #[serde(default)]
    pub chat_id: Option<String>,
    /// Bot API base URL; defaults to the public API.
    #[serde(default)]
    pub api_base: Option<String>,
}

impl FileConfig {
    /// Reads and parses a TOML configuration file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

/// Loads the relay configuration from `path` (if any) and the process
/// environment.
pub fn load(path: Option<&Path>) -> Result<RelayConfig> {
    let file = match path {
        Some(path) => FileConfig::from_path(path)?,
        None => FileConfig::default(),
    };
    resolve(file, |key| std::env::var(key).ok())
}

/// Layers `env` over `file` and validates the result.
pub fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Result<RelayConfig> {
    let pick = |key: &str, fallback: Option<String>| {
        env(key)
            .or(fallback)
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
    };

    let webhook_url = pick(ENV_WEBHOOK_URL, file.webhook_url).unwrap_or_default();
    let webhook_url = WebhookUrl::parse(&webhook_url).with_context(|| {
        format!("Set {ENV_WEBHOOK_URL} or `webhook_url` in the config file")
    })?;

    let mut config = RelayConfig::new(webhook_url);
    config.bot_token = pick(ENV_BOT_TOKEN, file.telegram.bot_token).and_then(BotToken::new);
    config.chat_id = pick(ENV_CHAT_ID, file.telegram.chat_id).and_then(ChatId::new);
    config.telegram_api_base = pick(ENV_API_BASE, file.telegram.api_base)
        .unwrap_or_else(|| DEFAULT_TELEGRAM_API_BASE.to_owned());

    if config.bot_token.is_some() != config.chat_id.is_some() {
        warn!("Only one of the Telegram bot token and chat id is set; notifications are disabled");
    }

    Ok(config)
}
