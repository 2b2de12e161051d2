//! Application configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Settings for fetching remote tag documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// User-Agent header sent with document requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_secs() -> u64 {
    30
}
fn default_user_agent() -> String {
    format!("tagdrop/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Settings for interactive play.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayConfig {
    /// Reshuffle the pool after every reset.
    #[serde(default)]
    pub reshuffle_on_reset: bool,
    /// Fixed shuffle seed; unset means a fresh random order per session.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Print the celebration banner on a fully correct answer.
    #[serde(default = "default_true")]
    pub celebrate: bool,
}

fn default_true() -> bool {
    true
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            reshuffle_on_reset: false,
            seed: None,
            celebrate: true,
        }
    }
}

/// Top-level tagdrop configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagdropConfig {
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub play: PlayConfig,
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `tagdrop.toml` in the current directory
/// 2. `~/.config/tagdrop/config.toml`
///
/// Environment variable overrides: `TAGDROP_TIMEOUT_SECS`, `TAGDROP_SEED`.
pub fn load_config() -> Result<TagdropConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<TagdropConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("tagdrop.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<TagdropConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => TagdropConfig::default(),
    };

    // Apply env var overrides
    if let Ok(value) = std::env::var("TAGDROP_TIMEOUT_SECS") {
        config.fetch.timeout_secs = value
            .parse()
            .with_context(|| format!("invalid TAGDROP_TIMEOUT_SECS: {value}"))?;
    }
    if let Ok(value) = std::env::var("TAGDROP_SEED") {
        config.play.seed = Some(
            value
                .parse()
                .with_context(|| format!("invalid TAGDROP_SEED: {value}"))?,
        );
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("tagdrop"))
}
