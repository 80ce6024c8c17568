//! Site configuration management.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Main configuration structure for blocksite.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    #[serde(default)]
    pub site: SiteConfig,

    /// Build settings.
    #[serde(default)]
    pub build: BuildConfig,

    /// robots.txt settings.
    #[serde(default)]
    pub robots: RobotsConfig,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title, used in page titles and headings.
    #[serde(default = "default_title")]
    pub title: String,

    /// Base URL for canonical links (e.g., "https://example.com").
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Site description for the index page meta tag.
    #[serde(default)]
    pub description: Option<String>,
}

/// Build configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Path to the JSON record source.
    #[serde(default = "default_source")]
    pub source: PathBuf,

    /// Output directory for the generated site.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Whether to emit the crawlable `/index/` route.
    #[serde(default = "default_true")]
    pub crawlable_index: bool,

    /// Stage each file in a temporary file and rename it into place.
    #[serde(default = "default_true")]
    pub atomic_writes: bool,

    /// Files next to the source document copied verbatim into the output root.
    #[serde(default = "default_passthrough")]
    pub passthrough: Vec<String>,
}

/// robots.txt configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RobotsConfig {
    /// Whether to generate robots.txt.
    #[serde(default)]
    pub enabled: bool,

    /// Paths crawlers should skip.
    #[serde(default)]
    pub disallow: Vec<String>,

    /// Paths crawlers may visit.
    #[serde(default)]
    pub allow: Vec<String>,
}

// Default value functions
fn default_title() -> String {
    "Blocks".to_string()
}

fn default_base_url() -> String {
    "http://localhost".to_string()
}

fn default_source() -> PathBuf {
    PathBuf::from("blocks.json")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_true() -> bool {
    true
}

fn default_passthrough() -> Vec<String> {
    vec!["robots.txt".to_string(), "llms.txt".to_string()]
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            base_url: default_base_url(),
            description: None,
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            output_dir: default_output_dir(),
            crawlable_index: true,
            atomic_writes: true,
            passthrough: default_passthrough(),
        }
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("BLOCKSITE").separator("__")
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent.
    ///
    /// Environment overrides apply in both cases.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::warn!(
                path = %path.display(),
                "configuration file not found, using defaults"
            );
        }

        Self::load_with_env(path)
    }

    /// Load configuration layered with environment variables.
    ///
    /// Variables use the `BLOCKSITE` prefix and `__` as separator, e.g.
    /// `BLOCKSITE__SITE__BASE_URL`. A missing file yields the defaults.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        Self::load_layered(path, environment())
    }

    fn load_layered(path: &Path, env: config::Environment) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(env)
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.site.title.is_empty() {
            return Err(CoreError::config("site.title cannot be empty"));
        }

        if self.site.base_url.is_empty() {
            return Err(CoreError::config("site.base_url cannot be empty"));
        }

        if self.site.base_url.ends_with('/') {
            tracing::warn!("site.base_url should not have a trailing slash");
        }

        Ok(())
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.site.base_url.trim_end_matches('/')
    }

    /// Get the full URL for a path.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{path}", self.base_url())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn create_test_config() -> String {
        r#"
[site]
title = "Machine Time"
base_url = "https://example.com"
description = "Short blocks of text"

[build]
source = "data/blocks.json"
output_dir = "dist"
crawlable_index = false
atomic_writes = false
passthrough = ["llms.txt"]

[robots]
enabled = true
disallow = ["/drafts/"]
"#
        .to_string()
    }

    #[test]
    fn test_load_config() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("blocksite.toml");
        let mut file = std::fs::File::create(&config_path).expect("create file");
        file.write_all(create_test_config().as_bytes())
            .expect("write");

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(config.site.title, "Machine Time");
        assert_eq!(config.site.base_url, "https://example.com");
        assert_eq!(
            config.site.description.as_deref(),
            Some("Short blocks of text")
        );
        assert_eq!(config.build.source, PathBuf::from("data/blocks.json"));
        assert_eq!(config.build.output_dir, PathBuf::from("dist"));
        assert!(!config.build.crawlable_index);
        assert!(!config.build.atomic_writes);
        assert_eq!(config.build.passthrough, vec!["llms.txt"]);
        assert!(config.robots.enabled);
        assert_eq!(config.robots.disallow, vec!["/drafts/"]);
        assert!(config.robots.allow.is_empty());
    }

    #[test]
    fn test_config_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("blocksite.toml");
        let minimal_config = r#"
[site]
title = "Minimal Site"
base_url = "https://example.com"
"#;
        std::fs::write(&config_path, minimal_config).expect("write");

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(config.build.source, PathBuf::from("blocks.json"));
        assert_eq!(config.build.output_dir, PathBuf::from("public"));
        assert!(config.build.crawlable_index);
        assert!(config.build.atomic_writes);
        assert_eq!(config.build.passthrough, vec!["robots.txt", "llms.txt"]);
        assert!(!config.robots.enabled);
    }

    #[test]
    fn test_base_url_trims_trailing_slash() {
        let mut config = Config::default();
        config.site.base_url = "https://example.com/".to_string();

        assert_eq!(config.base_url(), "https://example.com");
        assert_eq!(
            config.url_for("/block/1/"),
            "https://example.com/block/1/"
        );
        assert_eq!(config.url_for("raw/1.txt"), "https://example.com/raw/1.txt");
    }

    #[test]
    fn test_config_validation_empty_title() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("blocksite.toml");
        let config_content = r#"
[site]
title = ""
base_url = "https://example.com"
"#;
        std::fs::write(&config_path, config_content).expect("write");

        let result = Config::load(&config_path);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("title cannot be empty")
        );
    }

    #[test]
    fn test_config_validation_empty_base_url() {
        let mut config = Config::default();
        config.site.base_url = String::new();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("base_url cannot be empty"));
    }

    #[test]
    fn test_config_not_found() {
        let result = Config::load(Path::new("/nonexistent/blocksite.toml"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[test]
    fn test_load_or_default_without_file() {
        let config = Config::load_or_default(Path::new("/nonexistent/blocksite.toml"))
            .expect("defaults");
        assert_eq!(config.site.base_url, "http://localhost");
        assert!(config.build.crawlable_index);
    }

    #[test]
    fn test_load_with_env_reads_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("blocksite.toml");
        std::fs::write(&config_path, create_test_config()).expect("write");

        let config = Config::load_with_env(&config_path).expect("load config");
        assert_eq!(config.site.title, "Machine Time");
        assert_eq!(config.build.output_dir, PathBuf::from("dist"));
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("blocksite.toml");
        std::fs::write(&config_path, create_test_config()).expect("write");

        let mut vars = config::Map::new();
        vars.insert(
            "BLOCKSITE__SITE__BASE_URL".to_string(),
            "https://override.example".to_string(),
        );
        let config = Config::load_layered(&config_path, environment().source(Some(vars)))
            .expect("load config");

        assert_eq!(config.site.base_url, "https://override.example");
        assert_eq!(config.site.title, "Machine Time");
    }

    #[test]
    fn test_invalid_toml_reports_path() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("blocksite.toml");
        std::fs::write(&config_path, "[site\ntitle = 1").expect("write");

        let err = Config::load(&config_path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
