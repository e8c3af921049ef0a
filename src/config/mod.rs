mod schema;
mod validation;

pub use schema::{Config, FetchConfig, SourceConfig};
pub use validation::validate_config;

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::fetch::LoadOptions;
use crate::source::{DataSource, DirSource, HttpSource};

/// Get the config directory path (~/.config/liverank/)
pub fn get_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("liverank")
}

/// Get the default config file path (~/.config/liverank/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses default path (~/.config/liverank/config.yaml)
/// * `allow_missing` - Return `Config::default()` instead of failing when the file does not exist
///
/// # Errors
///
/// Returns an error if:
/// - The config file does not exist and `allow_missing` is false
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>, allow_missing: bool) -> Result<Config> {
    let config_path = path.unwrap_or_else(get_config_path);

    if !config_path.exists() {
        if allow_missing {
            return Ok(Config::default());
        }
        anyhow::bail!(
            "Config file not found at {}. Create ~/.config/liverank/config.yaml or pass --data-dir / --base-url",
            config_path.display()
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    parse_config(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))
}

/// Parse configuration from YAML text
pub fn parse_config(yaml: &str) -> Result<Config> {
    let config: Config = serde_saphyr::from_str(yaml)?;
    Ok(config)
}

impl Config {
    /// Replace the configured source (CLI `--data-dir` / `--base-url`)
    pub fn override_source(&mut self, data_dir: Option<PathBuf>, base_url: Option<String>) {
        if data_dir.is_some() || base_url.is_some() {
            self.source = SourceConfig { base_url, data_dir };
        }
    }

    /// Loader settings; call after [`validate_config`]
    pub fn load_options(&self) -> Result<LoadOptions> {
        let timeout = humantime::parse_duration(&self.fetch.timeout)
            .with_context(|| format!("Invalid fetch.timeout '{}'", self.fetch.timeout))?;
        Ok(LoadOptions {
            timeout,
            retries: self.fetch.retries,
            malformed: self.malformed_records,
        })
    }

    /// Build the configured ranking source; call after [`validate_config`]
    pub fn data_source(&self) -> Result<DataSource> {
        match (&self.source.base_url, &self.source.data_dir) {
            (Some(url), _) => Ok(DataSource::Http(
                HttpSource::new(url).context("Failed to create HTTP client")?,
            )),
            (None, Some(dir)) => Ok(DataSource::Dir(DirSource::new(dir))),
            (None, None) => anyhow::bail!("No ranking source configured"),
        }
    }
}
