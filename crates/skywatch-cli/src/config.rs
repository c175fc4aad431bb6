use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use skywatch_api::ApiConfig;
use skywatch_store::StoreConfig;

use crate::cli::Cli;

/// Limits for list output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// `top` size when none is given.
    pub default_top_n: usize,
    /// Largest accepted `top` size; bigger requests are capped.
    pub max_top_n: usize,
    /// Records shown after a fetch.
    pub preview_count: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_top_n: 10,
            max_top_n: 50,
            preview_count: 10,
        }
    }
}

/// Everything the binary is configured with.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub store: StoreConfig,
    pub api: ApiConfig,
    pub display: DisplayConfig,
}

/// A configuration plus whether the storage format was chosen explicitly.
#[derive(Debug)]
pub struct Resolved {
    pub config: TrackerConfig,
    pub format_fixed: bool,
}

impl TrackerConfig {
    /// Parse TOML text. Returns the config and whether it names `store.format`.
    pub fn from_toml(text: &str) -> anyhow::Result<(Self, bool)> {
        let table: toml::Table = toml::from_str(text)?;
        let names_format = table
            .get("store")
            .and_then(|s| s.as_table())
            .is_some_and(|s| s.contains_key("format"));
        let config: Self = toml::Value::Table(table).try_into()?;
        Ok((config, names_format))
    }

    pub fn load(path: &Path) -> anyhow::Result<(Self, bool)> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parsing config file {}", path.display()))
    }
}

/// Merge the optional config file with command-line overrides.
pub fn resolve(cli: &Cli) -> anyhow::Result<Resolved> {
    let (mut config, mut format_fixed) = match &cli.config {
        Some(path) => TrackerConfig::load(path)?,
        None => (TrackerConfig::default(), false),
    };
    if let Some(format) = cli.format {
        config.store.format = format.into();
        format_fixed = true;
    }
    if let Some(dir) = &cli.data_dir {
        config.store.data_dir = dir.clone();
    }
    Ok(Resolved {
        config,
        format_fixed,
    })
}
