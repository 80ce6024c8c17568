//! blocksite CLI
//!
//! Publishes an ordered collection of text blocks as a crawlable static site.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use std::path::PathBuf;

use blocksite::cmd::{self, build::BuildOptions};
use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for blocksite.
#[derive(Parser)]
#[command(
    name = "blocksite",
    version,
    about = "Publish text blocks as a crawlable static site"
)]
struct Cli {
    /// Path to configuration file [default: blocksite.toml, optional]
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Render every block and write the site (the default)
    Build {
        /// JSON record source
        #[arg(short, long)]
        source: Option<PathBuf>,
        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Override site base URL (e.g., https://example.com)
        #[arg(long)]
        base_url: Option<String>,
        /// Do not emit the crawlable /index/ route
        #[arg(long)]
        no_index: bool,
    },
    /// Validate configuration and records without writing
    Check {
        /// JSON record source
        #[arg(short, long)]
        source: Option<PathBuf>,
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    blocksite::init_tracing(cli.verbose);

    let config = cli.config.as_deref();

    match cli.command {
        None => {
            cmd::build::run(config, &BuildOptions::default())?;
        }
        Some(Commands::Build {
            source,
            output,
            base_url,
            no_index,
        }) => {
            let options = BuildOptions {
                source,
                output,
                base_url,
                no_index,
            };
            cmd::build::run(config, &options)?;
        }
        Some(Commands::Check { source, strict }) => {
            cmd::check::run(config, source, strict)?;
        }
    }

    Ok(())
}
