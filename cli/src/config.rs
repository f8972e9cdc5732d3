use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use handheld_extract::input::ground::DEFAULT_MARKER;
use handheld_extract::{ExtractOptions, HomebrewTitle};
use serde::Deserialize;

const APP_DIR: &str = "handheld-manifest";
const CONFIG_FILE: &str = "config.toml";

/// Settings read from `config.toml`. Every key is optional.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the manifest is written.
    pub output: PathBuf,
    pub grounding_marker: String,
    pub homebrew: Vec<HomebrewTitle>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: PathBuf::from("manifest.json"),
            grounding_marker: DEFAULT_MARKER.to_string(),
            homebrew: Vec::new(),
        }
    }
}

impl Config {
    /// Load from an explicit path, or from the user config directory when
    /// a file exists there. Falls back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::read(path);
        }
        match default_path() {
            Some(path) if path.is_file() => Self::read(&path),
            _ => Ok(Self::default()),
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            grounding_marker: self.grounding_marker.clone(),
        }
    }
}

fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}
