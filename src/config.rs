use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::controller::FailurePolicy;
use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

/// Settings for the admin tool, read from YAML and overridden by flags.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    pub base_url: String,
    pub products_per_page: u32,
    /// Limit used to approximate "all products" when filtering without a
    /// search query or category.
    pub filter_fetch_limit: u32,
    pub failure_policy: FailurePolicy,
    pub channel_buffer: usize,
    pub request_timeout_secs: Option<u64>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            products_per_page: 10,
            filter_fetch_limit: 100,
            failure_policy: FailurePolicy::Lenient,
            channel_buffer: 32,
            request_timeout_secs: None,
        }
    }
}

impl AdminConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.products_per_page == 0 {
            return Err(ConfigError::Invalid("products_per_page must be at least 1".into()));
        }
        if self.filter_fetch_limit == 0 {
            return Err(ConfigError::Invalid("filter_fetch_limit must be at least 1".into()));
        }
        if self.channel_buffer == 0 {
            return Err(ConfigError::Invalid("channel_buffer must be at least 1".into()));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "base_url must be an http(s) URL: {}",
                self.base_url
            )));
        }
        Ok(())
    }
}

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("USERPROFILE").map(PathBuf::from))
}

pub fn default_config_path() -> Option<PathBuf> {
    Some(home_dir()?.join(".product-admin").join("config.yml"))
}

pub fn load_config(path: &Path, allow_missing: bool) -> Result<AdminConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => parse_config(&contents, path),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
            Ok(AdminConfig::default())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ConfigError::NotFound(path.display().to_string()))
        }
        Err(source) => Err(ConfigError::Read {
            path: path.display().to_string(),
            source,
        }),
    }
}

fn parse_config(contents: &str, path: &Path) -> Result<AdminConfig, ConfigError> {
    if contents.trim().is_empty() {
        return Ok(AdminConfig::default());
    }
    let config: AdminConfig =
        serde_yaml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
    config.validate()?;
    Ok(config)
}
