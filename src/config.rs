use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::license::conflict::ConflictMode;
use crate::license::resolver::TieBreak;

/// Root configuration structure, deserialized from `.stack-license/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// How stack licenses and conflicts are resolved.
    #[serde(default)]
    pub resolution: ResolutionConfig,
}

/// Resolution behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ResolutionConfig {
    /// Which input license wins when several are common destinations.
    /// Defaults to `most-restrictive`.
    #[serde(default)]
    pub tie_break: TieBreak,
    /// How conflicting licenses are reported when no stack license exists.
    /// Defaults to `whole-set`.
    #[serde(default)]
    pub conflicts: ConflictMode,
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<project_path>/.stack-license/config.toml`
/// 3. `~/.config/stack-license/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = project_path.join(".stack-license").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("stack-license")
            .join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
}
