use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub rm: RmSettings,
    #[serde(default)]
    pub ls: LsSettings,
}

#[derive(Debug, Default, Deserialize)]
pub struct RmSettings {
    /// Worker threads for recursive force removal; absent or 0 means one per CPU.
    pub threads: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LsSettings {
    /// "always", "never" or "auto" (default).
    pub color: Option<String>,
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("corekit").join("config.toml"))
}

/// Loads the user configuration. A missing file is not an error; every tool
/// works with the defaults.
pub fn load() -> Result<Settings> {
    let Some(path) = config_path() else {
        return Ok(Settings::default());
    };
    if !path.exists() {
        return Ok(Settings::default());
    }
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}
