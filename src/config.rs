use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "holiday-checker.toml";

/// Top-level holiday checker configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckerConfig {
    /// Country shown when none is given on the command line.
    #[serde(default = "default_country")]
    pub country: String,

    /// Year whose holidays are fetched.
    #[serde(default = "default_year")]
    pub year: i32,

    /// Holiday provider settings.
    #[serde(default)]
    pub provider: ProviderToml,

    /// Cache settings.
    #[serde(default)]
    pub cache: CacheToml,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            country: default_country(),
            year: default_year(),
            provider: ProviderToml::default(),
            cache: CacheToml::default(),
        }
    }
}

fn default_country() -> String {
    "US".to_string()
}
fn default_year() -> i32 {
    holiday_checker::DEFAULT_YEAR
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderToml {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProviderToml {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    holiday_checker::provider::DEFAULT_BASE_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheToml {
    #[serde(default = "default_cache_dir")]
    pub dir: PathBuf,
}

impl Default for CacheToml {
    fn default() -> Self {
        Self {
            dir: default_cache_dir(),
        }
    }
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(".holiday-cache")
}

/// Load configuration.
///
/// An explicitly requested file must exist; the default file is optional
/// and built-in defaults apply when it is missing.
pub fn load(explicit: Option<&Path>) -> Result<CheckerConfig> {
    let path = match explicit {
        Some(path) => path,
        None => {
            let path = Path::new(DEFAULT_CONFIG_FILE);
            if !path.exists() {
                debug!("no config file, using defaults");
                return Ok(CheckerConfig::default());
            }
            path
        }
    };

    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    let config: CheckerConfig = toml::from_str(&toml_str)
        .with_context(|| format!("failed to parse TOML config: {}", path.display()))?;
    debug!(path = %path.display(), "config loaded");
    Ok(config)
}
