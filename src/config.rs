//! User configuration loaded from `~/.config/zcalc/config.toml`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::ui::DisplayOptions;
use crate::ui::display::DEFAULT_WIDTH;

/// Main configuration for zcalc.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log filter used when `RUST_LOG` is not set.
    pub log_level: String,
    /// Copy every successful result to the clipboard.
    pub copy_on_evaluate: bool,
    /// Show the formula line above the main display.
    pub show_formula: bool,
    /// Inner width of the display box.
    pub display_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            copy_on_evaluate: false,
            show_formula: true,
            display_width: DEFAULT_WIDTH,
        }
    }
}

impl Config {
    /// Load config from the default location, falling back to defaults.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from a specific path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Parse config from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// `$XDG_CONFIG_HOME/zcalc/config.toml` or the platform equivalent.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("zcalc").join("config.toml"))
    }

    pub fn display_options(&self) -> DisplayOptions {
        DisplayOptions {
            width: self.display_width,
            show_formula: self.show_formula,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_config() {
        let config = Config::parse("copy_on_evaluate = true\nlog_level = \"debug\"").unwrap();
        assert!(config.copy_on_evaluate);
        assert_eq!(config.log_level, "debug");
        assert!(config.show_formula);
        assert_eq!(config.display_width, DEFAULT_WIDTH);
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(Config::parse("show_formula = \"yes\"").is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("zcalc-missing-config.toml");
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_display_options() {
        let config = Config {
            show_formula: false,
            display_width: 20,
            ..Config::default()
        };
        let options = config.display_options();
        assert!(!options.show_formula);
        assert_eq!(options.width, 20);
    }
}
