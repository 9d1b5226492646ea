use crate::error::{Result, WaterfallError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The base config directory name under ~/.config/
const CONFIG_DIR_NAME: &str = "waterfall";
const CONFIG_FILE: &str = "config.toml";
const PREFS_FILE: &str = "prefs.json";

/// User configuration for the waterfall viewer.
///
/// Missing fields in a config file fall back to defaults, so partial
/// configs work correctly.
///
/// ```toml
/// # Fixed-offset timezone for header timestamps ("UTC", "+09:00", ...)
/// timezone = "UTC"
///
/// # Redraw cadence of the live monitor, in seconds
/// poll_interval_secs = 1
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Timezone identifier used when the snapshot doesn't carry one.
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Seconds between monitor redraws.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_poll_interval() -> u64 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            poll_interval_secs: default_poll_interval(),
        }
    }
}

impl Config {
    /// Load the config from the user's config directory. A missing file
    /// yields defaults; a malformed file is an error.
    pub fn load() -> Result<Config> {
        let path = config_dir()?.join(CONFIG_FILE);
        Config::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the settings for logical consistency.
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_secs == 0 {
            return Err(WaterfallError::Config(
                "poll_interval_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// The waterfall config directory (~/.config/waterfall).
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir()
        .ok_or_else(|| WaterfallError::Config("Could not determine config directory".to_string()))?;
    Ok(base.join(CONFIG_DIR_NAME))
}

/// Path of the durable preferences file (the collapsed-flag store).
pub fn prefs_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(PREFS_FILE))
}
