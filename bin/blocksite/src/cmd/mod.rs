//! CLI command implementations.

use std::path::Path;

use blocksite_core::Config;
use color_eyre::eyre::{Result, WrapErr, bail};

use crate::DEFAULT_CONFIG;

pub mod build;
pub mod check;

/// Load the configuration for a command.
///
/// An explicit path must exist; without one, `blocksite.toml` is used when
/// present and defaults otherwise.
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    match config_path {
        Some(path) => {
            if !path.exists() {
                bail!("Configuration file not found: {}", path.display());
            }
            Config::load_with_env(path).wrap_err("Failed to load configuration")
        }
        None => Config::load_or_default(Path::new(DEFAULT_CONFIG))
            .wrap_err("Failed to load configuration"),
    }
}
