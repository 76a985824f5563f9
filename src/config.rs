// src/config.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const ENV_CONFIG_PATH: &str = "FEEDWATCH_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "feedwatch.toml";

fn default_poll_interval_secs() -> u64 {
    5
}

/// One subscription declared in the startup config file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SubscriptionEntry {
    /// Telegram chat id the notifications go to.
    pub chat_id: i64,
    /// Upstream account/feed identity to poll.
    pub user: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    #[serde(default)]
    pub subscriptions: Vec<SubscriptionEntry>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            subscriptions: Vec::new(),
        }
    }
}

/// Load config from an explicit TOML path.
pub fn load_from(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading config from {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
}

/// Load config using env var + fallback:
/// 1) $FEEDWATCH_CONFIG
/// 2) feedwatch.toml in the working directory
/// 3) built-in defaults (no subscriptions)
pub fn load_default() -> Result<AppConfig> {
    if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
        let pb = PathBuf::from(p);
        return load_from(&pb)
            .with_context(|| format!("{ENV_CONFIG_PATH} points to {}", pb.display()));
    }
    let default_p = PathBuf::from(DEFAULT_CONFIG_PATH);
    if default_p.exists() {
        return load_from(&default_p);
    }
    Ok(AppConfig::default())
}

/// API credentials, environment-only (never in the config file).
#[derive(Debug, Clone)]
pub struct Credentials {
    pub rapidapi_key: String,
    pub telegram_token: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self> {
        let rapidapi_key =
            std::env::var("RAPIDAPI_KEY").context("RAPIDAPI_KEY is not set in the environment")?;
        let telegram_token = std::env::var("TELEGRAM_BOT_TOKEN")
            .context("TELEGRAM_BOT_TOKEN is not set in the environment")?;
        Ok(Self {
            rapidapi_key,
            telegram_token,
        })
    }
}
