//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod extract;
pub mod models;
pub mod process;

mod engine;
mod output;
mod source;

use std::path::{Path, PathBuf};

use tracing::debug;

use foodlabel_core::models::config::LabelConfig;

/// Load configuration from `-c`, else the default location, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<LabelConfig> {
    match config_path {
        Some(path) => {
            let path = Path::new(path);
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Ok(LabelConfig::from_file(path)?)
        }
        None => {
            let path: PathBuf = config::default_config_path();
            debug!("Using config {}", path.display());
            config::load_or_default(&path)
        }
    }
}
