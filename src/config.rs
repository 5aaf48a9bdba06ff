use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::{klog_debug, Error, Result};

/// Narrowest column that still fits a title, a count badge and a delete button.
pub const MIN_COLUMN_WIDTH: u16 = 12;
pub const DEFAULT_COLUMN_WIDTH: u16 = 30;

fn default_activation_distance() -> u16 {
    3
}

fn default_column_width() -> u16 {
    DEFAULT_COLUMN_WIDTH
}

fn default_mouse() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Cells the pointer must travel after a press before a drag starts.
    #[serde(default = "default_activation_distance")]
    pub activation_distance: u16,
    #[serde(default = "default_column_width")]
    pub column_width: u16,
    /// Capture mouse events. Without it only keyboard reordering is available.
    #[serde(default = "default_mouse")]
    pub mouse: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            activation_distance: default_activation_distance(),
            column_width: default_column_width(),
            mouse: default_mouse(),
        }
    }
}

impl Config {
    pub fn kanban_dir() -> Result<PathBuf> {
        Ok(dirs::home_dir().ok_or(Error::NoHomeDir)?.join(".kanban"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::kanban_dir()?.join("kanban.toml"))
    }

    /// Load from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path`; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        klog_debug!("Config::load path={}", path.display());
        if !path.exists() {
            klog_debug!("Config file not found, using defaults");
            return Ok(Self::default());
        }
        let config: Self = toml::from_str(&fs::read_to_string(path)?)?;
        config.validate()?;
        klog_debug!(
            "Config loaded: activation_distance={}, column_width={}, mouse={}",
            config.activation_distance,
            config.column_width,
            config.mouse
        );
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                klog_debug!("Creating config directory: {}", dir.display());
                fs::create_dir_all(dir)?;
            }
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        klog_debug!("Config saved to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.column_width < MIN_COLUMN_WIDTH {
            return Err(Error::Validation(format!(
                "column_width must be at least {} (got {})",
                MIN_COLUMN_WIDTH, self.column_width
            )));
        }
        Ok(())
    }
}
