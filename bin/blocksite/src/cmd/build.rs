//! Build command - generates the static site

use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use blocksite_core::Config;
use blocksite_generator::{BuildStats, Builder};
use color_eyre::eyre::{Result, WrapErr};

use super::load_config;

/// Command-line overrides for a build.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Record source document.
    pub source: Option<PathBuf>,
    /// Output directory.
    pub output: Option<PathBuf>,
    /// Site base URL.
    pub base_url: Option<String>,
    /// Skip the crawlable index route.
    pub no_index: bool,
}

impl BuildOptions {
    /// Apply the overrides to a loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(source) = &self.source {
            config.build.source = source.clone();
        }

        if let Some(output) = &self.output {
            config.build.output_dir = output.clone();
        }

        if let Some(base_url) = &self.base_url {
            tracing::info!(base_url = %base_url, "Overriding site base_url from CLI");
            config.site.base_url = base_url.clone();
        }

        if self.no_index {
            config.build.crawlable_index = false;
        }
    }
}

/// Run the build command.
///
/// Loads the records, renders every artifact and writes them to the output
/// directory.
pub fn run(config_path: Option<&Path>, options: &BuildOptions) -> Result<BuildStats> {
    let start = Instant::now();
    tracing::info!(?config_path, ?options, "Starting build");

    let mut config = load_config(config_path)?;
    options.apply(&mut config);
    config.validate().wrap_err("Invalid configuration")?;

    tracing::debug!(?config, "Loaded configuration");

    let output = config.build.output_dir.clone();
    let stats = Builder::new(config).build().wrap_err("Build failed")?;

    let duration = start.elapsed();

    println!();
    println!("  Build completed successfully!");
    println!();
    println!("  Records:    {}", stats.records);
    println!("  Pages:      {}", stats.record_artifacts);
    println!("  Site files: {}", stats.collection_artifacts);
    println!("  Written:    {} artifacts", stats.artifacts);
    println!();
    println!("  Duration:   {:.2}s", duration.as_secs_f64());
    println!("  Output:     {}", output.display());
    println!();

    tracing::info!(?stats, ?duration, "Build completed successfully");

    Ok(stats)
}
