//! Viewer configuration.
//!
//! Settings live in a small JSON file. Command-line flags override file
//! values; missing files fall back to defaults.
use crate::pager::PagerSettings;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_SCHEMA_VERSION: u32 = 1;
const CONFIG_DIR_NAME: &str = "sview";
const CONFIG_FILE_NAME: &str = "config.json";
const MAX_LINES_PER_PAGE: usize = u32::MAX as usize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewerConfig {
    pub schema_version: u32,
    #[serde(default = "default_lines_per_page")]
    pub lines_per_page: usize,
    /// Lines shown on each side of the target in `line`.
    #[serde(default = "default_surround")]
    pub surround: usize,
    #[serde(default = "default_max_invalid_commands")]
    pub max_invalid_commands: usize,
    /// Corpus used when `--corpus` is not given.
    #[serde(default)]
    pub corpus: Option<PathBuf>,
}

fn default_lines_per_page() -> usize {
    20
}

fn default_surround() -> usize {
    5
}

fn default_max_invalid_commands() -> usize {
    10
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            schema_version: CONFIG_SCHEMA_VERSION,
            lines_per_page: default_lines_per_page(),
            surround: default_surround(),
            max_invalid_commands: default_max_invalid_commands(),
            corpus: None,
        }
    }
}

impl ViewerConfig {
    pub fn pager_settings(&self) -> PagerSettings {
        PagerSettings {
            lines_per_page: self.lines_per_page,
            max_invalid_commands: self.max_invalid_commands,
        }
    }
}

/// Values from the command line that take precedence over the file.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub lines_per_page: Option<usize>,
    pub corpus: Option<PathBuf>,
}

/// `<config dir>/sview/config.json`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

pub fn load_config(path: &Path) -> Result<ViewerConfig> {
    let bytes = fs::read(path).with_context(|| format!("read config {}", path.display()))?;
    let config: ViewerConfig = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse config JSON {}", path.display()))?;
    Ok(config)
}

pub fn validate_config(config: &ViewerConfig) -> Result<()> {
    if config.schema_version != CONFIG_SCHEMA_VERSION {
        return Err(anyhow!(
            "unsupported config schema_version {}",
            config.schema_version
        ));
    }
    if config.lines_per_page == 0 {
        return Err(anyhow!("lines_per_page must be at least 1"));
    }
    if config.lines_per_page > MAX_LINES_PER_PAGE {
        return Err(anyhow!("lines_per_page must be at most {MAX_LINES_PER_PAGE}"));
    }
    if config.max_invalid_commands == 0 {
        return Err(anyhow!("max_invalid_commands must be at least 1"));
    }
    Ok(())
}

/// Load the explicit config, else the default location when it exists, else
/// defaults; then apply overrides and validate.
pub fn resolve_config(
    explicit: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<ViewerConfig> {
    let mut config = match explicit {
        Some(path) => load_config(path)?,
        None => match default_config_path().filter(|path| path.is_file()) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "using default config file");
                load_config(&path)?
            }
            None => ViewerConfig::default(),
        },
    };
    apply_overrides(&mut config, overrides);
    validate_config(&config)?;
    Ok(config)
}

fn apply_overrides(config: &mut ViewerConfig, overrides: &ConfigOverrides) {
    if let Some(lines_per_page) = overrides.lines_per_page {
        config.lines_per_page = lines_per_page;
    }
    if let Some(corpus) = &overrides.corpus {
        config.corpus = Some(corpus.clone());
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
