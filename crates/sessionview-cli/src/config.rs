//! CLI configuration.

use anyhow::{Context, Result};
use serde::Deserialize;
use sessionview_core::HighlightStyle;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Default case sensitivity for search and highlight
    #[serde(default)]
    pub case_sensitive: bool,
    /// Treat queries as regular expressions by default
    #[serde(default)]
    pub use_regex: bool,
    /// Tag of the element wrapping a highlighted match
    #[serde(default = "default_mark_tag")]
    pub mark_tag: String,
    /// Optional class put on highlight elements
    #[serde(default)]
    pub mark_class: Option<String>,
    /// Pretty-print JSON output
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_mark_tag() -> String {
    "mark".to_string()
}

fn default_pretty() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            use_regex: false,
            mark_tag: default_mark_tag(),
            mark_class: None,
            pretty: default_pretty(),
        }
    }
}

impl Config {
    /// Load config from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Load config from the user config directory or fall back to defaults.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Config::default()),
        }
    }

    /// `<config dir>/sessionview/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sessionview").join("config.toml"))
    }

    pub fn highlight_style(&self) -> HighlightStyle {
        HighlightStyle {
            tag: self.mark_tag.clone(),
            class_name: self.mark_class.clone(),
        }
    }
}
