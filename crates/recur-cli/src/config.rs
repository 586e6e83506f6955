//! Configuration loading from TOML files.
//!
//! Lookup order:
//! 1. `--config <PATH>` on the command line
//! 2. `$RECUR_CONFIG` environment variable
//! 3. `$HOME/.config/recur/config.toml`
//! 4. Built-in defaults (everything is optional)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub session: SessionConfig,
    pub output: OutputConfig,
    pub server: ServerConfig,
}

/// Interactive `recur session` settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Written before each read when stdin is a terminal.
    pub prompt: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Print the session record as JSON from `recur solve` by default.
    pub json: bool,
}

/// MCP server settings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Replaces the built-in server instructions.
    pub instructions: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            prompt: "n> ".into(),
        }
    }
}

/// Load config from disk. Returns defaults if no config file exists.
///
/// An explicit path must exist; the implicit locations are optional.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(p) = explicit {
        return read_config(p);
    }

    if let Some(p) = config_path()
        && p.exists()
    {
        return read_config(&p);
    }

    tracing::debug!("no config file found, using defaults");
    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config: Config =
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
    tracing::debug!("loaded config from {}", path.display());
    Ok(config)
}

fn config_path() -> Option<PathBuf> {
    if let Ok(p) = std::env::var("RECUR_CONFIG") {
        return Some(PathBuf::from(p));
    }
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .ok()
        .map(|home| PathBuf::from(home).join(".config").join("recur").join("config.toml"))
}
