//! Run configuration loaded from TOML.
//!
//! The API key is the only required value. Everything else defaults to a
//! 30-day AUD to NZD report.

use ratewatch_core::{CachePolicy, RateQuery};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "ratewatch.toml";
pub const DEFAULT_BASE_URL: &str = "https://v6.exchangerate-api.com/v6";
pub const API_KEY_ENV: &str = "RATEWATCH_API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("API key not found in {} (set [api] api_key or {API_KEY_ENV})", path.display())]
    MissingApiKey { path: PathBuf },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Full run configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportConfig {
    #[serde(default = "default_days")]
    pub days: u32,
    #[serde(default = "default_base_currency")]
    pub base_currency: String,
    #[serde(default = "default_target_currency")]
    pub target_currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheConfig {
    #[serde(default = "default_cache_path")]
    pub path: PathBuf,
    /// Entries older than this are refetched. Absent means never.
    #[serde(default)]
    pub max_age_days: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_csv_path")]
    pub csv_path: PathBuf,
    #[serde(default)]
    pub chart: ChartMode,
}

/// How the chart is shown at the end of a run.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChartMode {
    /// Full-screen viewer, dismissed with a key press.
    #[default]
    Interactive,
    /// Rendered off-screen and printed as text.
    Text,
    Off,
}

impl FromStr for ChartMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "interactive" => Ok(Self::Interactive),
            "text" => Ok(Self::Text),
            "off" | "none" => Ok(Self::Off),
            other => Err(format!(
                "unknown chart mode '{other}'. Valid: interactive, text, off"
            )),
        }
    }
}

impl fmt::Display for ChartMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Interactive => "interactive",
            Self::Text => "text",
            Self::Off => "off",
        };
        f.write_str(s)
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_days() -> u32 {
    30
}

fn default_base_currency() -> String {
    "AUD".to_string()
}

fn default_target_currency() -> String {
    "NZD".to_string()
}

fn default_cache_path() -> PathBuf {
    PathBuf::from("cache_exchange_rate_file").join("rates.json")
}

fn default_csv_path() -> PathBuf {
    PathBuf::from("exchange_rate_data.csv")
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            days: default_days(),
            base_currency: default_base_currency(),
            target_currency: default_target_currency(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: default_cache_path(),
            max_age_days: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
            chart: ChartMode::default(),
        }
    }
}

impl AppConfig {
    /// Load, apply the environment key override, and validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with_env_key(path, std::env::var(API_KEY_ENV).ok())
    }

    /// Like [`AppConfig::load`] with the environment value passed explicitly.
    pub fn load_with_env_key(path: &Path, env_key: Option<String>) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml(&content).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })?;

        if let Some(key) = env_key.filter(|k| !k.trim().is_empty()) {
            config.api.api_key = key;
        }
        if config.api.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey {
                path: path.to_path_buf(),
            });
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML string without validation.
    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Check value ranges. Does not require an API key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.report.days < 1 {
            return Err(ConfigError::Invalid("report.days must be at least 1".into()));
        }
        if self.report.base_currency.trim().is_empty() {
            return Err(ConfigError::Invalid("report.base_currency is empty".into()));
        }
        if self.report.target_currency.trim().is_empty() {
            return Err(ConfigError::Invalid("report.target_currency is empty".into()));
        }
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("api.base_url is empty".into()));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid("api.timeout_secs must be positive".into()));
        }
        Ok(())
    }

    pub fn query(&self) -> RateQuery {
        RateQuery {
            base_url: self.api.base_url.clone(),
            api_key: self.api.api_key.clone(),
            base_currency: self.report.base_currency.clone(),
            target_currency: self.report.target_currency.clone(),
        }
    }

    pub fn cache_policy(&self) -> CachePolicy {
        CachePolicy::max_age_days(self.cache.max_age_days)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }
}
