use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding strategy stanzas when nothing else is configured.
pub const DEFAULT_CONFIG_DIR: &str = "/usr/lib/abd/sources.list.d/";
/// Directory holding `abd-<strategy>` binaries when nothing else is configured.
pub const DEFAULT_STRATEGY_DIR: &str = "/usr/lib/abd/strategies/";

/// Global settings loaded from `~/.config/abd/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbdSettings {
    /// Directory of JSON strategy stanzas, read in listing order.
    pub config_dir: PathBuf,
    /// Directory searched for strategy programs.
    pub strategy_dir: PathBuf,
}

impl Default for AbdSettings {
    fn default() -> Self {
        Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            strategy_dir: PathBuf::from(DEFAULT_STRATEGY_DIR),
        }
    }
}

impl AbdSettings {
    /// Applies caller overrides (e.g. CLI flags) on top of loaded settings.
    pub fn with_overrides(
        mut self,
        config_dir: Option<PathBuf>,
        strategy_dir: Option<PathBuf>,
    ) -> Self {
        if let Some(dir) = config_dir {
            self.config_dir = dir;
        }
        if let Some(dir) = strategy_dir {
            self.strategy_dir = dir;
        }
        self
    }
}

/// Settings file, searched in `$XDG_CONFIG_HOME/abd/` then `$XDG_CONFIG_DIRS`.
pub fn settings_path() -> Result<Option<PathBuf>> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("abd")?;
    Ok(xdg_dirs.find_config_file("config.toml"))
}

/// Load settings from the XDG config file, falling back to defaults if there is none.
pub fn load_or_default() -> Result<AbdSettings> {
    match settings_path()? {
        Some(path) => load_from(&path),
        None => {
            tracing::debug!("no abd config.toml found, using defaults");
            Ok(AbdSettings::default())
        }
    }
}

/// Load settings from an explicit path; a missing file yields defaults.
pub fn load_from(path: &Path) -> Result<AbdSettings> {
    if !path.exists() {
        tracing::debug!("no settings file at {}, using defaults", path.display());
        return Ok(AbdSettings::default());
    }

    let data = fs::read_to_string(path)?;
    let settings: AbdSettings = toml::from_str(&data)?;
    Ok(settings)
}
