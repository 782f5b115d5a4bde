// src/config.rs
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::errors::{Result, ScreenError};
use crate::models::Weights;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";
pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(5);

/// Settings for talking to the screening backend and presenting its results.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_base: String,
    pub submit_timeout: Duration,
    pub fetch_timeout: Duration,
    pub notification_ttl: Duration,
    pub list_limit: Option<u32>,
    pub list_skip: Option<u32>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            submit_timeout: DEFAULT_SUBMIT_TIMEOUT,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            notification_ttl: DEFAULT_NOTIFICATION_TTL,
            list_limit: None,
            list_skip: None,
        }
    }
}

/// On-disk form of [`ClientConfig`]; every key is optional.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub api_base: Option<String>,
    pub submit_timeout_secs: Option<u64>,
    pub fetch_timeout_secs: Option<u64>,
    pub notification_ttl_secs: Option<u64>,
    pub list_limit: Option<u32>,
    pub list_skip: Option<u32>,
}

impl ClientConfig {
    /// Loads defaults, then the config file (if any), then environment variables.
    ///
    /// An explicit `path` must exist. Without one, the per-user config file is
    /// read when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        let file = match path {
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path().filter(|p| p.exists()),
        };
        if let Some(file) = file {
            log::debug!("Reading client config from {}", file.display());
            config.apply_file(FileConfig::from_path(&file)?);
        }

        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables only.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from defaults plus whatever `lookup` yields for the
    /// `SCREEN_*` variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        config.apply_env(lookup)?;
        config.validate()?;
        Ok(config)
    }

    pub fn apply_file(&mut self, file: FileConfig) {
        if let Some(api_base) = file.api_base {
            self.api_base = api_base;
        }
        if let Some(secs) = file.submit_timeout_secs {
            self.submit_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = file.fetch_timeout_secs {
            self.fetch_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = file.notification_ttl_secs {
            self.notification_ttl = Duration::from_secs(secs);
        }
        if file.list_limit.is_some() {
            self.list_limit = file.list_limit;
        }
        if file.list_skip.is_some() {
            self.list_skip = file.list_skip;
        }
    }

    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_base) = lookup("SCREEN_API_BASE") {
            self.api_base = api_base;
        }
        if let Some(secs) = parse_var::<u64>(&lookup, "SCREEN_SUBMIT_TIMEOUT_SECS")? {
            self.submit_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_var::<u64>(&lookup, "SCREEN_FETCH_TIMEOUT_SECS")? {
            self.fetch_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_var::<u64>(&lookup, "SCREEN_NOTIFICATION_TTL_SECS")? {
            self.notification_ttl = Duration::from_secs(secs);
        }
        if let Some(limit) = parse_var::<u32>(&lookup, "SCREEN_LIST_LIMIT")? {
            self.list_limit = Some(limit);
        }
        if let Some(skip) = parse_var::<u32>(&lookup, "SCREEN_LIST_SKIP")? {
            self.list_skip = Some(skip);
        }
        Ok(())
    }

    /// Rejects an origin that is not an absolute http(s) URL.
    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.api_base).map_err(|e| {
            ScreenError::Config(format!("invalid api_base '{}': {}", self.api_base, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ScreenError::Config(format!(
                "api_base must use http or https, got '{}'",
                url.scheme()
            )));
        }
        Ok(())
    }
}

impl FileConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}

/// `<config_dir>/resume-screen/config.toml`, when the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("resume-screen").join("config.toml"))
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| {
            ScreenError::Config(format!("{key} must be a non-negative integer, got '{raw}'"))
        }),
    }
}

/// A job posting described in TOML, e.g.
///
/// ```toml
/// job_title = "Backend Engineer"
/// description = "Rust services, Postgres, on-call rotation"
/// years_needed = "3"
///
/// [weights]
/// quality = 40
/// experience = 30
/// years = 20
/// location = 10
/// ```
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct JobSpec {
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub years_needed: Option<String>,
    #[serde(default)]
    pub weights: Option<Weights>,
}

impl JobSpec {
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}
