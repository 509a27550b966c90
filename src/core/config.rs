//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.delve/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::provider::github::DEFAULT_API_BASE_URL;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DelveConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub github: GitHubConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_repo: Option<String>,
    pub max_retries: Option<u32>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GitHubConfig {
    pub token: Option<String>,
    pub base_url: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_REPO: &str = "cli/cli";
pub const DEFAULT_MAX_RETRIES: u32 = 3;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub repo: String,
    /// Historical reference to start from (CLI only; None = latest).
    pub reference: Option<String>,
    pub token: Option<String>,
    pub base_url: String,
    pub max_retries: u32,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.delve/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".delve").join("config.toml"))
}

/// Load config from `~/.delve/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `DelveConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<DelveConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(DelveConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(DelveConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: DelveConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Delve Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_repo = "cli/cli"           # Repository to explore when none is given
# max_retries = 3                    # Transport retries before giving up

# [github]
# token = "ghp_..."                  # Or set GITHUB_TOKEN env var
# base_url = "https://api.github.com"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars
/// → CLI.
///
/// `cli_repo` and `cli_reference` come from CLI args (None = not specified).
pub fn resolve(
    config: &DelveConfig,
    cli_repo: Option<&str>,
    cli_reference: Option<&str>,
) -> ResolvedConfig {
    // Repo: CLI → env → config → default
    let repo = cli_repo
        .map(|s| s.to_string())
        .or_else(|| std::env::var("DELVE_REPO").ok())
        .or_else(|| config.general.default_repo.clone())
        .unwrap_or_else(|| DEFAULT_REPO.to_string());

    // Token: env → config
    let token = std::env::var("GITHUB_TOKEN")
        .ok()
        .or_else(|| config.github.token.clone());

    // API base URL: env → config → default
    let base_url = std::env::var("GITHUB_API_URL")
        .ok()
        .or_else(|| config.github.base_url.clone())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

    let max_retries = config.general.max_retries.unwrap_or(DEFAULT_MAX_RETRIES);

    ResolvedConfig {
        repo,
        reference: cli_reference.map(|s| s.to_string()),
        token,
        base_url,
        max_retries,
    }
}
