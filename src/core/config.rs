//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.podterm/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::engine::podman::DEFAULT_API_VERSION;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PodtermConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EngineConfig {
    pub url: Option<String>,
    pub api_version: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UiConfig {
    pub refresh_interval_secs: Option<u64>,
    pub accent_fg: Option<String>,
    pub accent_bg: Option<String>,
    pub dialog_bg: Option<String>,
    pub border: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub file: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_ENGINE_URL: &str = "http://localhost:8888";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 5;
pub const DEFAULT_LOG_LEVEL: &str = "debug";
pub const DEFAULT_LOG_FILE: &str = "podterm.log";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

/// Colour names as written in the config file; parsed by `tui::style`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleConfig {
    pub accent_fg: String,
    pub accent_bg: String,
    pub dialog_bg: String,
    pub border: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            accent_fg: "white".into(),
            accent_bg: "blue".into(),
            dialog_bg: "black".into(),
            border: "gray".into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub engine_url: String,
    pub api_version: String,
    pub request_timeout: Duration,
    pub refresh_interval: Duration,
    pub style: StyleConfig,
    pub log_level: String,
    pub log_file: PathBuf,
}

/// Values supplied on the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub url: Option<String>,
    pub log_level: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.podterm/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".podterm").join("config.toml"))
}

/// Load config from `explicit` or `~/.podterm/config.toml`.
///
/// A missing default file is generated and treated as empty. A missing
/// explicit file is an error.
pub fn load_config(explicit: Option<&Path>) -> Result<PodtermConfig, ConfigError> {
    if let Some(path) = explicit {
        return read_config(path);
    }

    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(PodtermConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(PodtermConfig::default());
    }

    read_config(&path)
}

fn read_config(path: &Path) -> Result<PodtermConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: PodtermConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# podterm configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [engine]
# url = "http://localhost:8888"     # Or set CONTAINER_HOST; tcp:// is accepted
# api_version = "v3.0.0"            # Or set PODTERM_API_VERSION
# timeout_secs = 30

# [ui]
# refresh_interval_secs = 5
# accent_fg = "white"
# accent_bg = "blue"
# dialog_bg = "black"
# border = "gray"

# [logging]
# level = "debug"                   # Or set PODTERM_LOG
# file = "podterm.log"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &PodtermConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

fn resolve_with_env(
    config: &PodtermConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Engine URL: CLI → env → config → default
    let engine_url = cli
        .url
        .clone()
        .or_else(|| env("CONTAINER_HOST"))
        .or_else(|| config.engine.url.clone())
        .unwrap_or_else(|| DEFAULT_ENGINE_URL.to_string());

    // API version: env → config → default
    let api_version = env("PODTERM_API_VERSION")
        .or_else(|| config.engine.api_version.clone())
        .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());

    // Log level: CLI → env → config → default
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| env("PODTERM_LOG"))
        .or_else(|| config.logging.level.clone())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

    let defaults = StyleConfig::default();
    let ui = &config.ui;
    let style = StyleConfig {
        accent_fg: ui.accent_fg.clone().unwrap_or(defaults.accent_fg),
        accent_bg: ui.accent_bg.clone().unwrap_or(defaults.accent_bg),
        dialog_bg: ui.dialog_bg.clone().unwrap_or(defaults.dialog_bg),
        border: ui.border.clone().unwrap_or(defaults.border),
    };

    ResolvedConfig {
        engine_url,
        api_version,
        request_timeout: Duration::from_secs(
            config.engine.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        ),
        refresh_interval: Duration::from_secs(
            ui.refresh_interval_secs
                .unwrap_or(DEFAULT_REFRESH_INTERVAL_SECS)
                .max(1),
        ),
        style,
        log_level,
        log_file: PathBuf::from(
            config
                .logging
                .file
                .clone()
                .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
        ),
    }
}
