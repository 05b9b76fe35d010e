use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Chart geometry in surface units; the projection maps commits into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub min_radius: f64,
    pub max_radius: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 600.0,
            margin_top: 10.0,
            margin_right: 10.0,
            margin_bottom: 30.0,
            margin_left: 20.0,
            min_radius: 3.0,
            max_radius: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExploreConfig {
    pub initial_position: f64,
    /// Control position change per arrow key press.
    pub slider_step: f64,
    pub brush_step: f64,
    pub tick_ms: u64,
}

impl Default for ExploreConfig {
    fn default() -> Self {
        Self {
            initial_position: 100.0,
            slider_step: 1.0,
            brush_step: 0.02,
            tick_ms: 200,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prefix for commit links, e.g. `https://github.com/owner/repo/commit/`.
    pub commit_url_base: Option<String>,
    pub chart: ChartConfig,
    pub explore: ExploreConfig,
}

impl Config {
    /// Load from `path` if given (must exist), else from the default location if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => match default_config_path() {
                Some(p) if p.exists() => Self::from_file(&p),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let config = Self::parse(&raw)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("locscope").join("config.toml"))
}
