pub mod config;
pub mod run;
pub mod validate;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use skyhop_core::config::SimConfig;
use skyhop_core::level::LevelData;

/// Reads the config file, or the defaults when none is given.
pub fn load_config(path: Option<&Path>) -> Result<Arc<SimConfig>> {
    let config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => SimConfig::default(),
    };
    config.validate().context("invalid config")?;
    Ok(Arc::new(config))
}

/// Reads decoded level records from JSON files, in order.
pub fn load_levels(paths: &[PathBuf]) -> Result<Vec<LevelData>> {
    paths
        .iter()
        .map(|path| {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading level {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing level {}", path.display()))
        })
        .collect()
}
