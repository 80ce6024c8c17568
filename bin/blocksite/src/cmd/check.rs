//! Check command - validate configuration and the record source

use std::path::{Path, PathBuf};

use blocksite_core::{JsonRecordStore, RecordCollection};
use color_eyre::eyre::{Result, bail};

use super::load_config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Errors found.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Warnings found.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Loads the configuration and the record source without writing anything.
/// With `strict`, warnings fail the check.
pub fn run(config_path: Option<&Path>, source: Option<PathBuf>, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration and records");

    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    let config = match load_config(config_path) {
        Ok(c) => {
            println!("  ✓ Configuration valid");
            Some(c)
        }
        Err(e) => {
            result.add_error(format!("Configuration error: {e:#}"));
            println!("  ✗ Configuration invalid: {e:#}");
            None
        }
    };

    if let Some(config) = config {
        let store = JsonRecordStore::new(source.unwrap_or(config.build.source));
        println!("\nChecking records in {}...", store.path().display());

        match store.load() {
            Ok(records) => {
                println!("  ✓ {} records loaded", records.len());
                check_records(&records, &mut result);
            }
            Err(e) => {
                result.add_error(e.to_string());
                println!("  ✗ {e}");
            }
        }
    }

    println!();
    if result.has_errors() {
        println!("Errors:");
        for error in result.errors() {
            println!("  ✗ {error}");
        }
    }
    if result.has_warnings() {
        println!("Warnings:");
        for warning in result.warnings() {
            println!("  ⚠ {warning}");
        }
    }

    if result.has_errors() {
        bail!("Check failed with {} error(s)", result.errors().len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Check failed with {} warning(s) in strict mode",
            result.warnings().len()
        );
    }

    println!("All checks passed.");
    Ok(())
}

/// Report ordinals that break pagination.
pub fn check_records(records: &RecordCollection, result: &mut ValidationResult) {
    for n in records.duplicates() {
        result.add_warning(format!("Block ordinal {n} appears more than once"));
    }

    for gap in records.gaps() {
        let (start, end) = (*gap.start(), *gap.end());
        if start == end {
            result.add_warning(format!(
                "Block {start} is missing; neighbouring prev/next links point to it"
            ));
        } else {
            result.add_warning(format!(
                "Blocks {start}-{end} are missing; neighbouring prev/next links point to them"
            ));
        }
    }
}
